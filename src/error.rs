//! Stargazer error types

use std::time::Duration;

/// Stargazer error types
#[derive(Debug, thiserror::Error)]
pub enum StargazerError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    // Fallback chain errors
    /// A provider did not answer within its configured timeout.
    #[error("provider '{provider}' timed out after {elapsed:?}")]
    ProviderTimeout { provider: String, elapsed: Duration },

    /// A provider answered with an error.
    #[error("provider '{provider}' failed: {reason}")]
    ProviderFailure { provider: String, reason: String },

    /// Every provider in the chain failed, including the terminal one.
    ///
    /// Chains are validated to end in an infallible provider, so this is an
    /// internal invariant violation rather than a recoverable condition.
    #[error("all providers exhausted (terminal provider failed)")]
    AllProvidersExhausted,

    /// The attempt was abandoned through its cancellation token.
    #[error("attempt cancelled")]
    Cancelled,

    // Translation errors
    /// A specific translation backend was requested but is not configured.
    #[error("translation backend unavailable: {0}")]
    TranslationUnavailable(String),

    // Profile errors
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Soft errors
    #[error("empty response from provider")]
    EmptyResponse,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for StargazerError {
    fn from(err: reqwest::Error) -> Self {
        StargazerError::Http(err.to_string())
    }
}

impl StargazerError {
    /// Map a non-success HTTP status to the matching error variant.
    pub(crate) fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => StargazerError::AuthenticationFailed,
            429 => StargazerError::RateLimited,
            _ => StargazerError::Api {
                status,
                message: message.into(),
            },
        }
    }
}

/// Result type alias for Stargazer operations
pub type Result<T> = std::result::Result<T, StargazerError>;
