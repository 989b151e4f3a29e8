use serde_json::Value;

use crate::domain::PredictionError;

/// Upper bound on the trimmed profile length.
///
/// Length is counted in UTF-16 code units, the unit browsers use for
/// `maxlength` and `String.length`, so the limit the UI enforces and the one
/// checked here agree. Characters outside the Basic Multilingual Plane (most
/// emoji) count as two.
pub const MAX_PROFILE_CHARS: usize = 2000;

/// A validated, trimmed free-text health profile.
///
/// Can only be obtained through [`Profile::parse`] or [`Profile::from_raw`],
/// so holding one proves the text is non-blank and within
/// [`MAX_PROFILE_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    text: String,
}

impl Profile {
    /// Validate a profile string.
    pub fn parse(raw: &str) -> Result<Self, PredictionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PredictionError::BlankProfile);
        }

        let length = utf16_len(trimmed);
        if length > MAX_PROFILE_CHARS {
            return Err(PredictionError::ProfileTooLong {
                length: Some(length),
            });
        }

        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    /// Validate an arbitrary value taken off the wire. Anything that is not a
    /// string counts as a missing profile.
    pub fn from_raw(raw: Option<&Value>) -> Result<Self, PredictionError> {
        match raw {
            Some(Value::String(s)) => Self::parse(s),
            _ => Err(PredictionError::BlankProfile),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length as measured against [`MAX_PROFILE_CHARS`].
    pub fn length(&self) -> usize {
        utf16_len(&self.text)
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
