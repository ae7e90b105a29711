//! Configuration schema structures with serde support

use super::error::ValidationError;
use super::secrets::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration structure for imagechat
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Provider API key (supports environment variable interpolation)
    pub api_key: SecretString,

    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for chat replies and image descriptions
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Sampling temperature for text completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Image models, tried in this order
    #[serde(default = "default_image_models")]
    pub image_models: Vec<String>,

    /// Square image size requested from every image model
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Bound on downloading an image returned by URL
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Timeout for provider calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Text-to-speech model
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Text-to-speech voice
    #[serde(default = "default_speech_voice")]
    pub speech_voice: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl AppConfig {
    /// Create a configuration with defaults and the given key
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            image_models: default_image_models(),
            image_size: default_image_size(),
            fetch_timeout_secs: default_fetch_timeout(),
            request_timeout_secs: default_request_timeout(),
            speech_model: default_speech_model(),
            speech_voice: default_speech_voice(),
            bind_address: default_bind_address(),
        }
    }

    /// Validate the required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_blank() {
            return Err(ValidationError::missing("api_key"));
        }

        if self.base_url.trim().is_empty() {
            return Err(ValidationError::missing("base_url"));
        }

        if self.chat_model.trim().is_empty() {
            return Err(ValidationError::missing("chat_model"));
        }

        if self.image_models.is_empty() {
            return Err(ValidationError::missing("image_models"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::out_of_range(
                "temperature",
                format!("{} is not within 0.0..=2.0", self.temperature),
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "fetch_timeout_secs",
                "must be greater than zero",
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "request_timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

// Default value functions for serde
pub(crate) fn default_base_url() -> String { crate::providers::openai::DEFAULT_BASE_URL.to_string() }
pub(crate) fn default_chat_model() -> String { "gpt-4.1-mini".to_string() }
pub(crate) fn default_temperature() -> f32 { 0.2 }
pub(crate) fn default_image_models() -> Vec<String> { crate::providers::fallback::default_image_models() }
pub(crate) fn default_image_size() -> String { crate::providers::fallback::DEFAULT_IMAGE_SIZE.to_string() }
pub(crate) fn default_fetch_timeout() -> u64 { 30 }
pub(crate) fn default_request_timeout() -> u64 { 120 }
pub(crate) fn default_speech_model() -> String { crate::speech::DEFAULT_SPEECH_MODEL.to_string() }
pub(crate) fn default_speech_voice() -> String { crate::speech::DEFAULT_SPEECH_VOICE.to_string() }
pub(crate) fn default_bind_address() -> String { "127.0.0.1:8000".to_string() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("sk-test-1234567890");
        assert_eq!(config.chat_model, "gpt-4.1-mini");
        assert_eq!(
            config.image_models,
            vec!["dall-e-3", "gpt-image-1", "gpt-image-1-mini"]
        );
        assert_eq!(config.image_size, "1024x1024");
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_yaml() {
        let config: AppConfig = serde_yaml::from_str("api_key: sk-abc\n").unwrap();
        assert_eq!(config.api_key.expose_secret(), "sk-abc");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("api_key: k\nmodels: []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_key_invalid() {
        let config = AppConfig::new("   ");
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "api_key");
    }

    #[test]
    fn test_temperature_range() {
        let mut config = AppConfig::new("k");
        config.temperature = 3.5;
        assert_eq!(config.validate().unwrap_err().field, "temperature");
    }
}
