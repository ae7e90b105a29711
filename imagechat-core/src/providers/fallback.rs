//! Ordered fallback across image generation models
//!
//! Each configured model is tried in turn. The first one that yields an image
//! wins; every failure is recorded and the next model is tried. This is a plain
//! linear traversal, not a retry of the same model.

use crate::protocol::types::{GeneratedImage, ImageResult};
use crate::providers::adapter::{ImageFetcher, ImageGeneration};
use crate::providers::error::{ProviderError, ProviderResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default square size requested from every backend
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Default bound on downloading an image returned by URL
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default model priority
pub fn default_image_models() -> Vec<String> {
    vec![
        "dall-e-3".to_string(),
        "gpt-image-1".to_string(),
        "gpt-image-1-mini".to_string(),
    ]
}

/// One failed backend attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAttempt {
    /// Model identifier that failed
    pub model: String,
    /// Rendered error
    pub error: String,
}

/// What happened during one fallback traversal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackReport {
    /// Models tried, in order
    pub attempted: Vec<String>,
    /// Failures, in order
    pub failures: Vec<FailedAttempt>,
}

impl FallbackReport {
    /// Whether a model other than the first produced the result
    pub fn used_fallback(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Image generation driver with ordered model fallback
#[derive(Clone)]
pub struct ImageFallback {
    /// Ordered list of backend model identifiers
    models: Arc<[String]>,

    /// Fixed square resolution, e.g. `1024x1024`
    size: String,

    /// Bound on the URL download step
    fetch_timeout: Duration,

    generator: Arc<dyn ImageGeneration>,
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageFallback {
    /// Create a driver over `models`, tried in the given order
    pub fn new(
        models: Vec<String>,
        generator: Arc<dyn ImageGeneration>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            models: models.into(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            generator,
            fetcher,
        }
    }

    /// Set the requested image size
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Set the URL download timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Configured models in priority order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate an image, trying each model until one succeeds
    pub async fn generate_image(&self, prompt: &str) -> ImageResult {
        self.generate_image_with_report(prompt).await.0
    }

    /// Like [`generate_image`](Self::generate_image), also returning the attempt log
    pub async fn generate_image_with_report(&self, prompt: &str) -> (ImageResult, FallbackReport) {
        let mut report = FallbackReport::default();
        let mut last_error: Option<ProviderError> = None;

        for model in self.models.iter() {
            report.attempted.push(model.clone());

            match self.attempt(model, prompt).await {
                Ok(encoded_image) => {
                    info!(
                        model = %model,
                        failed_before = report.failures.len(),
                        "Image generated"
                    );
                    return (
                        ImageResult::Success {
                            encoded_image,
                            model_used: model.clone(),
                        },
                        report,
                    );
                }
                Err(err) => {
                    warn!(model = %model, error = %err, "Image model failed, trying next");
                    report.failures.push(FailedAttempt {
                        model: model.clone(),
                        error: err.to_string(),
                    });
                    last_error = Some(err);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no image models configured".to_string());
        error!(attempts = report.attempted.len(), "All image models failed");

        (
            ImageResult::Failure {
                error: format!("All image model attempts failed. Last error: {}", detail),
            },
            report,
        )
    }

    /// One backend: generate, then normalize the response shape to base64
    async fn attempt(&self, model: &str, prompt: &str) -> ProviderResult<String> {
        debug!(model = %model, size = %self.size, "Requesting image");

        match self.generator.generate(model, prompt, &self.size).await? {
            GeneratedImage::Inline { b64 } if !b64.trim().is_empty() => Ok(b64),
            GeneratedImage::Inline { .. } => Err(ProviderError::UnrecognizedImageResponse {
                model: model.to_string(),
            }),
            GeneratedImage::Remote { url } => {
                let bytes = self.fetcher.fetch(&url, self.fetch_timeout).await?;
                if bytes.is_empty() {
                    return Err(ProviderError::Fetch {
                        url,
                        message: "empty body".to_string(),
                    });
                }
                Ok(BASE64.encode(bytes))
            }
            GeneratedImage::Unrecognized => Err(ProviderError::UnrecognizedImageResponse {
                model: model.to_string(),
            }),
        }
    }
}
