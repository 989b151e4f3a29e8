use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::{PredictionError, RiskAssessment};

use super::container::Container;
use super::controller::{HealthController, HealthStatus, PredictController};

/// Largest request body the predict route will buffer. A maximal profile
/// fully escaped as `\uXXXX` stays well under this.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Error body returned for every failed prediction.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// HTTP view of a [`PredictionError`]: its status code plus `{ "error": message }`.
pub struct ApiError(PredictionError);

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let kind = err.kind();
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if kind.is_client_error() {
            debug!("Prediction rejected: {} ({})", kind, status);
        } else {
            warn!("Prediction failed: {} ({})", kind, status);
        }

        (
            status,
            Json(ErrorBody {
                error: err.message(),
            }),
        )
            .into_response()
    }
}

/// Build the application's HTTP routes:
///
/// | Route               | Handler                        |
/// |---------------------|--------------------------------|
/// | `POST /api/predict` | [`PredictController::predict`] |
/// | `GET /health`       | [`HealthController::health`]   |
pub fn build_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/predict",
            post(predict).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route("/health", get(health))
        .with_state(container)
        .layer(middleware::from_fn(log_http_request))
}

/// Serve the application on an already bound listener until `shutdown`
/// resolves.
pub async fn serve<F>(
    listener: TcpListener,
    container: Arc<Container>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(container))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn predict(
    State(container): State<Arc<Container>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    async move {
        let body = body.map_err(rejected_body)?;
        let controller = PredictController::new(&container);
        let assessment = controller.predict(&body).await?;
        Ok::<_, ApiError>(Json(assessment))
    }
    .instrument(span)
    .await
}

/// A body axum could not buffer still gets a prediction error: oversized
/// bodies cannot hold a valid profile, anything else carries no profile.
fn rejected_body(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PredictionError::ProfileTooLong { length: None }.into()
    } else {
        debug!("Unreadable request body: {}", rejection.body_text());
        PredictionError::BlankProfile.into()
    }
}

async fn health(State(container): State<Arc<Container>>) -> Json<HealthStatus> {
    Json(HealthController::new(&container).health())
}

async fn log_http_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();
    let response = next.run(req).await;
    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http request"
    );
    response
}
