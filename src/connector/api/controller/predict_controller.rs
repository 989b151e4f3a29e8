use serde_json::Value;

use crate::domain::{PredictionError, RiskAssessment};

use super::super::Container;

pub struct PredictController<'a> {
    container: &'a Container,
}

impl<'a> PredictController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Handle a raw `POST /api/predict` body.
    ///
    /// A body that is not JSON, or has no string `input`, is a blank profile
    /// rather than a transport error.
    pub async fn predict(&self, body: &[u8]) -> Result<RiskAssessment, PredictionError> {
        let request: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        self.container
            .predict_use_case()
            .execute(request.get("input"))
            .await
    }
}
