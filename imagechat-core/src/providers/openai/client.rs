//! OpenAI client implementation

use super::types::{
    OpenAIChatRequest, OpenAIChatResponse, OpenAIImageRequest, OpenAIImageResponse,
    OpenAISpeechRequest,
};
use crate::config::{AppConfig, SecretString};
use crate::http::{CallKind, HttpClient, RequestOptions, DEFAULT_REQUEST_TIMEOUT};
use crate::protocol::types::{CompletionMessage, GeneratedImage};
use crate::providers::adapter::{ImageGeneration, SpeechSynthesis, TextCompletion};
use crate::providers::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_IDLE_PER_HOST: usize = 10;

/// OpenAI provider implementation
#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: SecretString,
    base_url: String,
    request_timeout: Duration,
    http: HttpClient,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: impl Into<SecretString>, base_url: impl Into<String>) -> ProviderResult<Self> {
        let http = HttpClient::with_config(CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, MAX_IDLE_PER_HOST)?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            http,
        })
    }

    /// Create a provider from application configuration
    pub fn from_config(config: &AppConfig) -> ProviderResult<Self> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let http = HttpClient::with_config(CONNECT_TIMEOUT, request_timeout, MAX_IDLE_PER_HOST)?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
            http,
        })
    }

    /// The HTTP client used for provider calls
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Get the base URL for this provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a call kind
    fn url(&self, call_kind: CallKind) -> String {
        format!("{}{}", self.base_url, call_kind.endpoint())
    }

    /// Build request headers
    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    fn options(&self, call_kind: CallKind) -> RequestOptions {
        RequestOptions::new(call_kind).with_timeout(self.request_timeout)
    }
}

#[async_trait]
impl TextCompletion for OpenAIProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[CompletionMessage],
        temperature: f32,
    ) -> ProviderResult<String> {
        let request = OpenAIChatRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature: Some(temperature),
        };
        let options = self.options(CallKind::Chat);

        let value = self
            .http
            .post_json(&self.url(CallKind::Chat), &self.headers(), &request, &options)
            .await?;
        let response: OpenAIChatResponse = serde_json::from_value(value)?;

        response.first_content().map(str::to_string).ok_or_else(|| {
            ProviderError::ParseError(format!(
                "chat completion from {} carried no message content [request_id: {}]",
                model, options.request_id
            ))
        })
    }
}

#[async_trait]
impl ImageGeneration for OpenAIProvider {
    async fn generate(&self, model: &str, prompt: &str, size: &str) -> ProviderResult<GeneratedImage> {
        let request = OpenAIImageRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            size: size.to_string(),
            n: Some(1),
        };
        let options = self.options(CallKind::Images);

        let value = self
            .http
            .post_json(&self.url(CallKind::Images), &self.headers(), &request, &options)
            .await?;
        let response: OpenAIImageResponse = serde_json::from_value(value)?;

        let image = response.first_image();
        debug!(
            "Image response from {} classified as {} [request_id: {}]",
            model,
            match image {
                GeneratedImage::Inline { .. } => "inline",
                GeneratedImage::Remote { .. } => "remote",
                GeneratedImage::Unrecognized => "unrecognized",
            },
            options.request_id
        );
        Ok(image)
    }
}

#[async_trait]
impl SpeechSynthesis for OpenAIProvider {
    async fn speak(&self, model: &str, voice: &str, input: &str) -> ProviderResult<Vec<u8>> {
        let request = OpenAISpeechRequest {
            model: model.to_string(),
            voice: voice.to_string(),
            input: input.to_string(),
        };
        let options = self.options(CallKind::Speech);

        self.http
            .post_bytes(&self.url(CallKind::Speech), &self.headers(), &request, &options)
            .await
    }
}
