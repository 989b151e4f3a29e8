use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::RiskProvider;
use crate::domain::{
    build_risk_request, parse_assessment, PredictionError, Profile, RiskAssessment,
};

/// Validates a profile, asks the provider for three ranked risks and
/// validates what comes back.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent predictions.
pub struct PredictRisksUseCase {
    provider: Arc<dyn RiskProvider>,
}

impl PredictRisksUseCase {
    pub fn new(provider: Arc<dyn RiskProvider>) -> Self {
        Self { provider }
    }

    /// Run the pipeline on a raw wire value (the `input` field of a request
    /// body, which may be missing or of the wrong type).
    pub async fn execute(&self, raw: Option<&Value>) -> Result<RiskAssessment, PredictionError> {
        let profile = Profile::from_raw(raw)?;
        self.predict(&profile).await
    }

    /// Run the pipeline on an already validated profile.
    pub async fn predict(&self, profile: &Profile) -> Result<RiskAssessment, PredictionError> {
        let request = build_risk_request(profile);
        debug!(
            "Requesting risk assessment from {} ({} UTF-16 units)",
            self.provider.model_name(),
            profile.length()
        );

        let start_time = Instant::now();
        let completion = self.provider.complete(&request).await.map_err(|e| {
            warn!("Provider call failed after {:?}: {}", start_time.elapsed(), e);
            PredictionError::from(e)
        })?;

        let assessment = parse_assessment(&completion).inspect_err(|e| {
            if let Some(detail) = e.detail() {
                warn!("Rejected provider completion ({}): {}", e.kind(), detail);
            }
        })?;

        info!("Risk assessment completed in {:?}", start_time.elapsed());

        Ok(assessment)
    }
}
