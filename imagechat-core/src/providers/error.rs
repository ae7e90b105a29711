//! Provider error types and handling

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure of one call to the remote provider
///
/// Variants mirror what the OpenAI API reports; the image fallback driver
/// records them per model and the text paths fold them into placeholder text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    /// 401 / 403
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// 400, or input rejected before any call was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other non-success status, keyed by the provider's error code
    #[error("Provider error: {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Insufficient quota: {0}")]
    InsufficientQuota(String),

    /// 5xx, 408 and 504
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Image response missing b64_json/url from model {model}.")]
    UnrecognizedImageResponse { model: String },

    /// Downloading an image returned by URL failed or timed out
    #[error("Failed to fetch image from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::ParseError(err.to_string());
        }
        match err.status() {
            Some(status) => Self::Provider {
                code: format!("HTTP_{}", status.as_u16()),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}
