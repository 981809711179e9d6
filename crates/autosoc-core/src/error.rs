use thiserror::Error;

/// Result type alias for AutoSOC operations
pub type Result<T> = std::result::Result<T, SocError>;

/// Errors that can occur while obtaining or checking a dashboard snapshot
#[derive(Error, Debug)]
pub enum SocError {
    /// Authentication failed - unknown client or missing credentials
    #[error("authentication failed: client not authorized")]
    Unauthorized,

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Snapshot arrived but violates the model invariants
    #[error("malformed snapshot: {}", violations.join("; "))]
    MalformedSnapshot {
        /// Every invariant the snapshot broke
        violations: Vec<String>,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl SocError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }

    /// Returns true if the snapshot could not be obtained at all.
    ///
    /// The view keeps showing the last known snapshot and marks it stale.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Timeout(_)
                | Self::Connection(_)
                | Self::Api { .. }
                | Self::Unauthorized
                | Self::NotFound { .. }
                | Self::Json(_)
        )
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = SocError::Api {
            code: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_retryable());
        assert!(err.is_fetch_failure());
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let err = SocError::Api {
            code: 400,
            message: "bad request".into(),
        };
        assert!(!err.is_retryable());
        assert!(!SocError::Unauthorized.is_retryable());
    }

    #[test]
    fn malformed_snapshot_is_not_a_fetch_failure() {
        let err = SocError::MalformedSnapshot {
            violations: vec!["risk_score 140 exceeds 100".into(), "duplicate alert id a1".into()],
        };
        assert!(!err.is_fetch_failure());
        assert_eq!(
            err.to_string(),
            "malformed snapshot: risk_score 140 exceeds 100; duplicate alert id a1"
        );
    }
}
