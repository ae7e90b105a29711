//! Provider capability traits
//!
//! Defines the outbound seams of the core. Each component receives the
//! capabilities it needs at construction time, so tests can substitute fakes
//! for the remote provider.

use crate::protocol::types::{CompletionMessage, GeneratedImage};
use crate::providers::error::ProviderResult;
use async_trait::async_trait;
use std::time::Duration;

/// Remote text completion
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete a conversation and return the assistant's text
    async fn complete(
        &self,
        model: &str,
        messages: &[CompletionMessage],
        temperature: f32,
    ) -> ProviderResult<String>;
}

/// Remote image generation
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    /// Generate one image for `prompt` at `size` (e.g. `1024x1024`)
    async fn generate(&self, model: &str, prompt: &str, size: &str)
        -> ProviderResult<GeneratedImage>;
}

/// Raw byte download used for images returned by URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url`, failing with `ProviderError::Fetch` on timeout or non-2xx
    async fn fetch(&self, url: &str, timeout: Duration) -> ProviderResult<Vec<u8>>;
}

/// Remote text-to-speech
#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    /// Render `input` as encoded audio bytes
    async fn speak(&self, model: &str, voice: &str, input: &str) -> ProviderResult<Vec<u8>>;
}
