//! # Domain Layer
//!
//! Profile validation, risk models, the prompt contract and the error
//! taxonomy. Independent of HTTP and of any particular model provider.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
