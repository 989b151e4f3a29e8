//! End-to-end tests for the HTTP API.
//!
//! Each test starts the real router on an ephemeral port, backed by a
//! scripted provider, and talks to it over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use nudge::connector::api::MAX_BODY_BYTES;
use nudge::{serve, Completion, CompletionRequest, Container, ProviderError, RiskProvider};

type Outcome = fn() -> Result<Completion, ProviderError>;

struct FakeProvider {
    outcome: Outcome,
    calls: AtomicUsize,
}

#[async_trait]
impl RiskProvider for FakeProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

struct TestApp {
    base_url: String,
    provider: Arc<FakeProvider>,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn(outcome: Outcome) -> Self {
        let provider = Arc::new(FakeProvider {
            outcome,
            calls: AtomicUsize::new(0),
        });
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let container = Arc::new(Container::with_provider(provider.clone()));
        tokio::spawn(serve(listener, container, std::future::pending()));

        Self {
            base_url: format!("http://{addr}"),
            provider,
            client: reqwest::Client::new(),
        }
    }

    async fn predict(&self, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/api/predict", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Request failed");
        let status = response.status().as_u16();
        let body = response.json().await.expect("Response was not JSON");
        (status, body)
    }

    fn provider_calls(&self) -> usize {
        self.provider.calls.load(Ordering::SeqCst)
    }
}

fn smoker_risks() -> Value {
    json!({
        "risks": [
            {
                "title": "Lung cancer",
                "explanation": "As a 45 year old smoker your lung cancer risk is elevated.",
                "action": "Ask about low-dose CT screening eligibility."
            },
            {
                "title": "Coronary artery disease",
                "explanation": "Smoking and male sex at 45 raise your 10-year ASCVD risk.",
                "action": "Get a lipid panel and blood pressure check this month."
            },
            {
                "title": "COPD",
                "explanation": "Smoking is the leading cause of COPD.",
                "action": "Request spirometry if you have any cough or breathlessness."
            }
        ]
    })
}

fn ok_outcome() -> Result<Completion, ProviderError> {
    Ok(Completion::content(smoker_risks().to_string()))
}

#[tokio::test]
async fn test_empty_input_returns_400() {
    let app = TestApp::spawn(ok_outcome).await;

    let (status, body) = app.predict(json!({ "input": "" })).await;

    assert_eq!(status, 400);
    let error = body["error"].as_str().unwrap().to_lowercase();
    assert!(error.contains("profile"), "unexpected message: {error}");
    assert_eq!(app.provider_calls(), 0);
}

#[tokio::test]
async fn test_missing_input_returns_400() {
    let app = TestApp::spawn(ok_outcome).await;

    for body in [json!({}), json!({ "input": 12 }), json!({ "input": "   " })] {
        let (status, body) = app.predict(body).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().to_lowercase().contains("health profile"));
    }
    assert_eq!(app.provider_calls(), 0);
}

#[tokio::test]
async fn test_non_json_body_returns_400() {
    let app = TestApp::spawn(ok_outcome).await;

    let response = app
        .client
        .post(format!("{}/api/predict", app.base_url))
        .header("content-type", "text/plain")
        .body("45 year old male smoker")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.provider_calls(), 0);
}

#[tokio::test]
async fn test_input_over_2000_chars_returns_400() {
    let app = TestApp::spawn(ok_outcome).await;

    let (status, body) = app.predict(json!({ "input": "a".repeat(2001) })).await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("2000"));
    assert_eq!(app.provider_calls(), 0);
}

#[tokio::test]
async fn test_oversized_body_returns_json_400() {
    let app = TestApp::spawn(ok_outcome).await;

    let response = app
        .client
        .post(format!("{}/api/predict", app.base_url))
        .json(&json!({ "input": "a".repeat(MAX_BODY_BYTES + 1024) }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 400);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "got {content_type}");
    let body: Value = response.json().await.expect("Response was not JSON");
    assert!(body["error"].as_str().unwrap().contains("2000"));
    assert_eq!(app.provider_calls(), 0);
}

#[tokio::test]
async fn test_valid_profile_returns_risks_in_order() {
    let app = TestApp::spawn(ok_outcome).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 200);
    assert_eq!(body, smoker_risks());
    assert_eq!(app.provider_calls(), 1);
}

#[tokio::test]
async fn test_refusal_returns_422() {
    let app = TestApp::spawn(|| Ok(Completion::refusal("I can't assist with that."))).await;

    let (status, body) = app.predict(json!({ "input": "something odd" })).await;

    assert_eq!(status, 422);
    assert!(body["error"].as_str().unwrap().contains("rephrase"));
}

#[tokio::test]
async fn test_malformed_reply_returns_500_without_internals() {
    let app = TestApp::spawn(|| Ok(Completion::content(r#"{"risks": []}"#))).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 500);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("try again"));
    assert!(!error.contains("risks"));
}

#[tokio::test]
async fn test_auth_failure_returns_500_with_config_message() {
    let app = TestApp::spawn(|| Err(ProviderError::Unauthorized { status: 401 })).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 500);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("misconfigured"));
    assert!(!error.contains("401"));
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let app = TestApp::spawn(|| Err(ProviderError::RateLimited)).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 429);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("wait") && error.contains("try again"));
}

#[tokio::test]
async fn test_timeout_returns_504() {
    let app = TestApp::spawn(|| Err(ProviderError::Timeout(Duration::from_secs(30)))).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 504);
    assert!(body["error"].as_str().unwrap().contains("too long"));
}

#[tokio::test]
async fn test_unknown_failure_hides_provider_text() {
    let app =
        TestApp::spawn(|| Err(ProviderError::other("connection reset by 10.0.0.7"))).await;

    let (status, body) = app.predict(json!({ "input": "45 year old male smoker" })).await;

    assert_eq!(status, 500);
    assert!(!body["error"].as_str().unwrap().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::spawn(ok_outcome).await;

    let response = app
        .client
        .get(format!("{}/health", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "fake");
}
