mod risk_provider;

pub use risk_provider::*;
