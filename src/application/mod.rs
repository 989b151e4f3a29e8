//! # Application Layer
//!
//! The provider interface and the prediction use case that drives it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
