use serde::{Deserialize, Serialize};

/// Number of risks every assessment contains.
pub const RISK_COUNT: usize = 3;

/// One assessed health risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Risk {
    title: String,
    explanation: String,
    action: String,
}

impl Risk {
    pub fn new(
        title: impl Into<String>,
        explanation: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            explanation: explanation.into(),
            action: action.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

/// Exactly [`RISK_COUNT`] risks, most urgent first.
///
/// Order is whatever the provider returned; nothing here re-ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    risks: [Risk; RISK_COUNT],
}

impl RiskAssessment {
    pub fn new(risks: [Risk; RISK_COUNT]) -> Self {
        Self { risks }
    }

    /// Build from a list of any length. Hands the list back when the length
    /// is wrong.
    pub fn from_vec(risks: Vec<Risk>) -> Result<Self, Vec<Risk>> {
        risks.try_into().map(Self::new)
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }
}
