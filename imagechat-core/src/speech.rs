//! Text-to-speech helper
//!
//! Renders text to audio through the speech capability and optionally writes
//! it to disk. Independent of the chat pipeline.

use crate::config::AppConfig;
use crate::providers::adapter::SpeechSynthesis;
use crate::providers::error::{ProviderError, ProviderResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_SPEECH_MODEL: &str = "gpt-4o-mini-tts";
pub const DEFAULT_SPEECH_VOICE: &str = "alloy";

/// Conventional file name for a saved reply
pub const DEFAULT_OUTPUT_FILE: &str = "assistant_output.mp3";

#[derive(Clone)]
pub struct SpeechSynthesizer {
    backend: Arc<dyn SpeechSynthesis>,
    model: String,
    voice: String,
}

impl SpeechSynthesizer {
    pub fn new(backend: Arc<dyn SpeechSynthesis>) -> Self {
        Self {
            backend,
            model: DEFAULT_SPEECH_MODEL.to_string(),
            voice: DEFAULT_SPEECH_VOICE.to_string(),
        }
    }

    pub fn from_config(backend: Arc<dyn SpeechSynthesis>, config: &AppConfig) -> Self {
        Self::new(backend)
            .with_model(config.speech_model.clone())
            .with_voice(config.speech_voice.clone())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Render `text` to encoded audio bytes
    pub async fn synthesize(&self, text: &str) -> ProviderResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(ProviderError::InvalidRequest(
                "speech input must not be empty".to_string(),
            ));
        }

        self.backend.speak(&self.model, &self.voice, text).await
    }

    /// Render `text` and write the audio to `path`, returning the path
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        path: impl AsRef<Path>,
    ) -> ProviderResult<PathBuf> {
        let path = path.as_ref().to_path_buf();
        let audio = self.synthesize(text).await?;

        tokio::fs::write(&path, &audio).await.map_err(|e| {
            ProviderError::Other(format!("failed writing audio to {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), bytes = audio.len(), "Wrote synthesized speech");
        Ok(path)
    }
}
