//! Classifier error types

use std::time::Duration;

/// Classifier error types
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid taxonomy: {0}")]
    Taxonomy(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("missing credential {0} (environment or secrets file)")]
    MissingCredential(&'static str),
}

impl ClassifierError {
    /// Whether this error came from talking to the completion service.
    ///
    /// Transport-class errors are folded into a degraded classification
    /// result; everything else is returned to the caller.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClassifierError::Http(_)
                | ClassifierError::Timeout(_)
                | ClassifierError::Api { .. }
                | ClassifierError::RateLimited { .. }
                | ClassifierError::AuthenticationFailed
                | ClassifierError::ModelNotFound(_)
                | ClassifierError::EmptyResponse
        )
    }
}

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
