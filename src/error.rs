//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Caller-supplied required data is missing or unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value had to come from configuration but none was configured.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// An external string did not match any member of a closed set.
    #[error("Unknown {kind} value: {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },

    /// A payload-specific operation was applied to the wrong payload kind.
    #[error("Type mismatch: expected {expected} payload, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The gateway answered with a non-zero business code.
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        SdkError::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// HTTP-layer errors.
///
/// These come out of the transport unchanged; the builder layer never
/// reinterprets them.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_value_message() {
        let err = SdkError::unknown("Currency", "XYZ");
        assert_eq!(err.to_string(), "Unknown Currency value: \"XYZ\"");
    }

    #[test]
    fn test_http_error_converts() {
        let err: SdkError = HttpError::Unauthorized.into();
        assert!(matches!(err, SdkError::Http(HttpError::Unauthorized)));
    }
}
