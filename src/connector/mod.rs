//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Model providers (OpenAI Chat Completions, offline mock)
//! - HTTP API (axum router, controllers, dependency container)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
