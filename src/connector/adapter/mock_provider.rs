use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::application::RiskProvider;
use crate::domain::{Completion, CompletionRequest, ProviderError};

/// Offline [`RiskProvider`] that answers every request with the same three
/// risks, serialized exactly as a real provider would send them.
///
/// Lets the server and its UI be exercised without credentials or network.
pub struct MockRiskProvider;

impl MockRiskProvider {
    pub fn new() -> Self {
        Self
    }

    fn canned_content() -> String {
        json!({
            "risks": [
                {
                    "title": "Cardiovascular disease",
                    "explanation": "Assuming no recent lipid or blood pressure measurements, your stated profile cannot rule out elevated 10-year cardiovascular risk. This is a placeholder assessment produced without a model.",
                    "action": "Book a fasting lipid panel and a blood pressure check within the next month."
                },
                {
                    "title": "Type 2 diabetes",
                    "explanation": "Without a recent HbA1c it is assumed you have not been screened. This is a placeholder assessment produced without a model.",
                    "action": "Ask your primary care clinician for an HbA1c test at your next visit."
                },
                {
                    "title": "Colorectal cancer",
                    "explanation": "Screening status was not mentioned, so it is assumed to be outstanding. This is a placeholder assessment produced without a model.",
                    "action": "Check whether you are due for colorectal screening under USPSTF age guidance."
                }
            ]
        })
        .to_string()
    }
}

impl Default for MockRiskProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RiskProvider for MockRiskProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        debug!(
            "MockRiskProvider: answering {} char profile with canned risks",
            request.user().chars().count()
        );
        Ok(Completion::content(Self::canned_content()))
    }

    fn model_name(&self) -> &str {
        "mock-provider"
    }
}
