//! Chat pipeline
//!
//! The request router classifies a message and dispatches it either to the
//! image fallback driver plus description generator, or to the conversation
//! responder. Text completion failures degrade to placeholder strings; only an
//! exhausted image fallback produces an error response.

pub mod describe;
pub mod respond;
pub mod router;

pub use describe::{DescriptionGenerator, DESCRIPTION_HISTORY_LIMIT};
pub use respond::{ConversationResponder, CONVERSATION_HISTORY_LIMIT};
pub use router::{RequestRouter, EMPTY_MESSAGE_REPLY};

use crate::config::AppConfig;

/// Model and sampling settings for text completions
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
}

impl CompletionSettings {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.chat_model.clone(), config.temperature)
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::new("gpt-4.1-mini", 0.2)
    }
}
