use serde::Deserialize;

use crate::domain::{Completion, PredictionError, Risk, RiskAssessment, RISK_COUNT};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RiskPayload {
    risks: Vec<Risk>,
}

/// Turn a provider completion into a validated assessment.
///
/// A refusal short-circuits before any content is looked at. Everything else
/// that does not match the risk schema exactly is a malformed response.
pub fn parse_assessment(completion: &Completion) -> Result<RiskAssessment, PredictionError> {
    if let Some(reason) = completion.refusal_reason() {
        return Err(PredictionError::refusal(reason));
    }

    let text = completion
        .text()
        .ok_or_else(|| PredictionError::malformed("completion carried no content"))?;

    let payload: RiskPayload = serde_json::from_str(text)
        .map_err(|e| PredictionError::malformed(format!("content is not a risk payload: {e}")))?;

    RiskAssessment::from_vec(payload.risks).map_err(|risks| {
        PredictionError::malformed(format!(
            "expected {RISK_COUNT} risks, got {}",
            risks.len()
        ))
    })
}
