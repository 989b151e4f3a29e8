mod completion;
mod profile;
mod risk;

pub use completion::*;
pub use profile::*;
pub use risk::*;
