use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::debug;

use crate::application::{PredictRisksUseCase, RiskProvider};
use crate::connector::adapter::{MockRiskProvider, OpenAiConfig, OpenAiRiskProvider};

pub struct ContainerConfig {
    /// Provider credential. Required unless `mock_provider` is set.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Upper bound on a single provider round trip.
    pub provider_timeout: Duration,
    /// Serve canned risks instead of calling a real provider.
    pub mock_provider: bool,
}

/// Process-wide dependencies, built once at startup and shared read-only
/// between requests.
pub struct Container {
    provider: Arc<dyn RiskProvider>,
    predict_use_case: PredictRisksUseCase,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let provider: Arc<dyn RiskProvider> = if config.mock_provider {
            debug!("Using mock risk provider");
            Arc::new(MockRiskProvider::new())
        } else {
            let Some(api_key) = config.api_key.filter(|key| !key.trim().is_empty()) else {
                bail!("Missing OPENAI_API_KEY: set it in the environment or pass --api-key");
            };
            debug!(
                "Using OpenAI risk provider at {} (model {}, timeout {:?})",
                config.base_url, config.model, config.provider_timeout
            );
            let openai = OpenAiConfig::new(api_key)
                .with_model(config.model)
                .with_base_url(config.base_url)
                .with_timeout(config.provider_timeout);
            Arc::new(OpenAiRiskProvider::new(openai)?)
        };

        Ok(Self::with_provider(provider))
    }

    /// Build around an already constructed provider.
    pub fn with_provider(provider: Arc<dyn RiskProvider>) -> Self {
        let predict_use_case = PredictRisksUseCase::new(Arc::clone(&provider));
        Self {
            provider,
            predict_use_case,
        }
    }

    pub fn predict_use_case(&self) -> &PredictRisksUseCase {
        &self.predict_use_case
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::DEFAULT_BASE_URL;

    fn config(api_key: Option<&str>, mock_provider: bool) -> ContainerConfig {
        ContainerConfig {
            api_key: api_key.map(String::from),
            model: "gpt-4o-mini".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(5),
            mock_provider,
        }
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = Container::new(config(None, false)).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        assert!(Container::new(config(Some("  "), false)).is_err());
    }

    #[test]
    fn api_key_selects_openai_provider() {
        let container = Container::new(config(Some("sk-test"), false)).unwrap();
        assert_eq!(container.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn mock_provider_needs_no_key() {
        let container = Container::new(config(None, true)).unwrap();
        assert_eq!(container.model_name(), "mock-provider");
    }
}
