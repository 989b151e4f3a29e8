use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::RiskProvider;
use crate::domain::{Completion, CompletionRequest, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat Completions request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ApiMessage<'a>; 2],
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

/// Minimal subset of the Chat Completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Connection settings for [`OpenAiRiskProvider`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`RiskProvider`] backed by the OpenAI Chat Completions API (or any server
/// that speaks the same structured-output dialect).
///
/// The schema is sent in strict mode, so the model either answers with JSON
/// matching it or sets `refusal`. HTTP-level failures are translated here:
///
/// | Upstream                  | [`ProviderError`]  |
/// |---------------------------|--------------------|
/// | 401 / 403                 | `Unauthorized`     |
/// | 429                       | `RateLimited`      |
/// | client timeout            | `Timeout`          |
/// | anything else             | `Other`            |
pub struct OpenAiRiskProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    timeout: Duration,
}

impl OpenAiRiskProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            COMPLETIONS_PATH
        );
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            url,
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_status(status: StatusCode, body: &str) -> ProviderError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized {
                status: status.as_u16(),
            },
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
            _ => ProviderError::other(format!("API returned {status}: {body}")),
        }
    }

    fn classify_transport(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::other(format!("request failed: {err}"))
        }
    }
}

#[async_trait]
impl RiskProvider for OpenAiRiskProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let schema = request.response_schema();
        let payload = ApiRequest {
            model: &self.model,
            temperature: request.temperature(),
            messages: [
                ApiMessage {
                    role: "system",
                    content: request.system(),
                },
                ApiMessage {
                    role: "user",
                    content: request.user(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema.name(),
                    strict: true,
                    schema: schema.schema(),
                },
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiRiskProvider: API returned {status}: {body}");
            return Err(Self::classify_status(status, &body));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout)
            } else {
                ProviderError::other(format!("failed to parse response: {e}"))
            }
        })?;

        let message = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| ProviderError::other("response contained no choices"))?;

        debug!(
            "OpenAiRiskProvider: completion received (refusal={}, content_len={})",
            message.refusal.is_some(),
            message.content.as_deref().map_or(0, str::len)
        );

        Ok(Completion::from_parts(message.content, message.refusal))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
