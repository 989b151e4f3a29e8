//! Domain services: building the provider request and validating its reply.

mod risk_prompt;
mod risk_response;

pub use risk_prompt::*;
pub use risk_response::*;
