use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Debug, Error)]
pub enum MtError {
    /// A translation was attempted on a client that was never given a provider
    #[error("Translation client not initialized: no provider configured")]
    ClientNotInitialized,
    /// Missing or invalid provider configuration (credentials, endpoint)
    #[error("Configuration error: {0}")]
    Config(String),
    /// Locale code rejected before any request was made
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Request rejected locally (e.g. text over the per-string limit)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Transport failure (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success HTTP status returned by the translation service
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    /// The service answered but the payload was not what we expected
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    /// A chunk came back with a different number of strings than it was sent
    #[error("Expected {expected} translations, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl MtError {
    /// Whether repeating the same request could succeed.
    ///
    /// Network failures, rate limiting (429) and server errors (5xx) are
    /// transient. Everything else (bad key, unsupported language pair,
    /// malformed response) fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            MtError::Network(_) => true,
            MtError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key
        MtError::Network(err.without_url().to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
