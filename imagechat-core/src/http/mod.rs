//! HTTP transport for provider calls
//!
//! Wraps a pooled reqwest client. Every provider call carries a request id
//! sent as `X-Request-ID` and echoed into error messages, so a failed image
//! attempt in the logs can be matched to the upstream request. Non-success
//! statuses are mapped to `ProviderError` in [`error`].

pub mod client;
pub mod error;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

pub use client::HttpClient;

/// Provider call timeout when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// The provider endpoints imagechat talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    Chat,
    Images,
    Speech,
}

impl CallKind {
    /// Path relative to the provider base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            CallKind::Chat => "/chat/completions",
            CallKind::Images => "/images/generations",
            CallKind::Speech => "/audio/speech",
        }
    }
}

/// Per-call settings
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub call_kind: CallKind,
    pub request_id: Uuid,
    pub timeout: Duration,
}

impl RequestOptions {
    /// Options with a fresh request id and the default timeout
    pub fn new(call_kind: CallKind) -> Self {
        Self {
            call_kind,
            request_id: Uuid::new_v4(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
