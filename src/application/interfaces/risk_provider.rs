use async_trait::async_trait;

use crate::domain::{Completion, CompletionRequest, ProviderError};

/// A language-model service that can answer a structured completion request.
///
/// Implementors own transport, authentication and vendor-specific wire
/// formats. The prediction pipeline only sees the logical request and either
/// a [`Completion`] (which may be a refusal) or a typed [`ProviderError`].
#[async_trait]
pub trait RiskProvider: Send + Sync {
    /// Submit one request. Exactly one round trip; no retries.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
