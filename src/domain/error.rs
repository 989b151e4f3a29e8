use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::MAX_PROFILE_CHARS;

/// Stable classification of every way a prediction can end without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PredictionErrorKind {
    BlankProfile,
    ProfileTooLong,
    ModelRefusal,
    MalformedResponse,
    AuthFailure,
    RateLimited,
    ProviderTimeout,
    UnknownFailure,
}

impl PredictionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlankProfile => "blank_profile",
            Self::ProfileTooLong => "profile_too_long",
            Self::ModelRefusal => "model_refusal",
            Self::MalformedResponse => "malformed_response",
            Self::AuthFailure => "auth_failure",
            Self::RateLimited => "rate_limited",
            Self::ProviderTimeout => "provider_timeout",
            Self::UnknownFailure => "unknown_failure",
        }
    }

    /// HTTP-style status code for this kind. The value is transport-agnostic;
    /// only the API layer turns it into a response.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BlankProfile | Self::ProfileTooLong => 400,
            Self::ModelRefusal => 422,
            Self::RateLimited => 429,
            Self::ProviderTimeout => 504,
            Self::MalformedResponse | Self::AuthFailure | Self::UnknownFailure => 500,
        }
    }

    /// Whether the caller caused the failure (and can fix it by editing the profile).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BlankProfile | Self::ProfileTooLong | Self::ModelRefusal
        )
    }
}

impl fmt::Display for PredictionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the prediction pipeline.
///
/// `Display` yields the user-facing message. Variants that wrap upstream
/// failures keep the detail for server-side logs only; it never appears in the
/// rendered message.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Please enter your health profile before submitting.")]
    BlankProfile,

    /// `length` is `None` when the request body was too large to read at all.
    #[error("Health profile must be {} characters or fewer.", MAX_PROFILE_CHARS)]
    ProfileTooLong { length: Option<usize> },

    #[error("The model could not assess this profile. Please rephrase it and try again.")]
    ModelRefusal { reason: String },

    #[error("Received an unexpected response from the model. Please try again.")]
    MalformedResponse { detail: String },

    #[error("The prediction service is misconfigured. Please contact the site administrator.")]
    AuthFailure { detail: String },

    #[error("Too many requests right now. Please wait a moment and try again.")]
    RateLimited,

    #[error("The model took too long to respond. Please try again.")]
    ProviderTimeout { after: Duration },

    #[error("Something went wrong while generating your assessment. Please try again.")]
    UnknownFailure { detail: String },
}

impl PredictionError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub fn refusal(reason: impl Into<String>) -> Self {
        Self::ModelRefusal {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> PredictionErrorKind {
        match self {
            Self::BlankProfile => PredictionErrorKind::BlankProfile,
            Self::ProfileTooLong { .. } => PredictionErrorKind::ProfileTooLong,
            Self::ModelRefusal { .. } => PredictionErrorKind::ModelRefusal,
            Self::MalformedResponse { .. } => PredictionErrorKind::MalformedResponse,
            Self::AuthFailure { .. } => PredictionErrorKind::AuthFailure,
            Self::RateLimited => PredictionErrorKind::RateLimited,
            Self::ProviderTimeout { .. } => PredictionErrorKind::ProviderTimeout,
            Self::UnknownFailure { .. } => PredictionErrorKind::UnknownFailure,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// User-facing message. Same as `to_string()`.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Server-side detail for logging, if the variant carries any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::ProfileTooLong { length } => Some(match length {
                Some(length) => format!("{length} UTF-16 units"),
                None => "request body over size limit".to_string(),
            }),
            Self::ModelRefusal { reason } => Some(reason.clone()),
            Self::MalformedResponse { detail }
            | Self::AuthFailure { detail }
            | Self::UnknownFailure { detail } => Some(detail.clone()),
            Self::ProviderTimeout { after } => Some(format!("timed out after {after:?}")),
            Self::BlankProfile | Self::RateLimited => None,
        }
    }
}

/// Failure reported by a [`crate::application::RiskProvider`] at the
/// invocation boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Provider request failed: {0}")]
    Other(String),
}

impl ProviderError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<ProviderError> for PredictionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized { .. } => PredictionError::AuthFailure {
                detail: err.to_string(),
            },
            ProviderError::RateLimited => PredictionError::RateLimited,
            ProviderError::Timeout(after) => PredictionError::ProviderTimeout { after },
            ProviderError::Other(detail) => PredictionError::UnknownFailure { detail },
        }
    }
}
