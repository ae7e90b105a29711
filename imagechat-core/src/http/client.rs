//! Pooled reqwest client shared by every provider call and image download

use crate::http::error::map_http_error;
use crate::http::RequestOptions;
use crate::providers::adapter::ImageFetcher;
use crate::providers::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Inline base64 images are large; anything past this is refused
const MAX_RESPONSE_SIZE: usize = 32 * 1024 * 1024;

const USER_AGENT: &str = concat!("imagechat/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    max_response_size: usize,
}

impl HttpClient {
    pub fn new() -> ProviderResult<Self> {
        Self::with_config(Duration::from_secs(10), super::DEFAULT_REQUEST_TIMEOUT, 10)
    }

    pub fn with_config(
        connect_timeout: Duration,
        request_timeout: Duration,
        max_idle_per_host: usize,
    ) -> ProviderResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    /// POST `body` as JSON and decode a JSON reply
    ///
    /// A reply that declares a non-JSON content type is rejected before the
    /// body is read; proxies and captive portals tend to answer with HTML.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &B,
        options: &RequestOptions,
    ) -> ProviderResult<Value> {
        let response = self.send(url, headers, body, options).await?;

        if let Some(content_type) = response.headers().get(reqwest::header::CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or("").to_ascii_lowercase();
            if !content_type.contains("application/json") {
                return Err(ProviderError::Provider {
                    code: "INVALID_CONTENT_TYPE".to_string(),
                    message: format!(
                        "Expected application/json, got: {} [request_id: {}]",
                        content_type, options.request_id
                    ),
                });
            }
        }

        let bytes = self.read_body(response, options).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Undecodable {:?} reply [request_id: {}]: {}", options.call_kind, options.request_id, e);
            ProviderError::ParseError(format!(
                "Invalid response format: {} [request_id: {}]",
                e, options.request_id
            ))
        })
    }

    /// POST `body` as JSON and return the raw reply, e.g. encoded audio
    pub async fn post_bytes<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &B,
        options: &RequestOptions,
    ) -> ProviderResult<Vec<u8>> {
        let response = self.send(url, headers, body, options).await?;
        self.read_body(response, options).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &B,
        options: &RequestOptions,
    ) -> ProviderResult<Response> {
        info!("Calling {} [request_id: {}]", options.call_kind.endpoint(), options.request_id);
        debug!("Request URL: {}", url);

        let mut request = self
            .client
            .post(url)
            .timeout(options.timeout)
            .header("X-Request-ID", options.request_id.to_string())
            .json(body);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, options))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("{} returned {} [request_id: {}]", options.call_kind.endpoint(), status, options.request_id);
        let response_headers = response.headers().clone();
        let body = response.text().await.ok();
        Err(map_http_error(status, Some(&response_headers), body, options.request_id))
    }

    /// Read the whole body, refusing anything past the size ceiling
    async fn read_body(&self, response: Response, options: &RequestOptions) -> ProviderResult<Vec<u8>> {
        self.check_size(response.content_length(), options)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, options))?;
        self.check_size(Some(bytes.len() as u64), options)?;

        Ok(bytes.to_vec())
    }

    fn check_size(&self, length: Option<u64>, options: &RequestOptions) -> ProviderResult<()> {
        match length {
            Some(length) if length as usize > self.max_response_size => Err(ProviderError::Provider {
                code: "RESPONSE_TOO_LARGE".to_string(),
                message: format!(
                    "Response size {} exceeds maximum {} [request_id: {}]",
                    length, self.max_response_size, options.request_id
                ),
            }),
            _ => Ok(()),
        }
    }
}

fn transport_error(err: reqwest::Error, options: &RequestOptions) -> ProviderError {
    if err.is_timeout() {
        warn!("Timed out after {:?} [request_id: {}]", options.timeout, options.request_id);
        ProviderError::Timeout(options.timeout.as_secs())
    } else if err.is_connect() {
        error!("Connection failed [request_id: {}]: {}", options.request_id, err);
        ProviderError::Network(format!("Connection failed: {} [request_id: {}]", err, options.request_id))
    } else {
        ProviderError::Network(format!("{} [request_id: {}]", err, options.request_id))
    }
}

#[async_trait]
impl ImageFetcher for HttpClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> ProviderResult<Vec<u8>> {
        debug!("Downloading generated image from {}", url);

        let fetch_error = |message: String| ProviderError::Fetch {
            url: url.to_string(),
            message,
        };
        let timed_out = || fetch_error(format!("timed out after {} seconds", timeout.as_secs()));

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { timed_out() } else { fetch_error(e.to_string()) })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Image download returned {} for {}", status, url);
            return Err(fetch_error(format!("HTTP {}", status.as_u16())));
        }

        let too_large = |length: u64| {
            fetch_error(format!(
                "image size {} exceeds maximum {}",
                length, self.max_response_size
            ))
        };

        if let Some(length) = response.content_length() {
            if length as usize > self.max_response_size {
                return Err(too_large(length));
            }
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                timed_out()
            } else {
                fetch_error(format!("failed reading image bytes: {}", e))
            }
        })?;

        // chunked replies carry no length header
        if bytes.len() > self.max_response_size {
            return Err(too_large(bytes.len() as u64));
        }

        Ok(bytes.to_vec())
    }
}
