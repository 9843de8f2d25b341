//! Error type reported by data sources.

use thiserror::Error;

/// Failure of a data-source call.
///
/// The profile screen forwards these verbatim on its error channel, so the
/// type is `Clone` and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be reached or refused the request
    #[error("Source unavailable: {reason}")]
    Unavailable { reason: String },

    /// The requested resource does not exist
    #[error("'{resource}' not found")]
    NotFound { resource: String },

    /// Credentials missing or rejected
    #[error("Unauthorized")]
    Unauthorized,

    /// The response could not be decoded
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            SourceError::unavailable("offline").to_string(),
            "Source unavailable: offline"
        );
        assert_eq!(
            SourceError::NotFound {
                resource: "user 7".to_string()
            }
            .to_string(),
            "'user 7' not found"
        );
    }
}
