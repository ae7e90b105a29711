//! Short captions for generated images

use super::CompletionSettings;
use crate::protocol::types::{recent_turns, ChatTurn, CompletionMessage};
use crate::providers::adapter::TextCompletion;
use std::sync::Arc;
use tracing::warn;

/// Maximum history turns forwarded as caption context
pub const DESCRIPTION_HISTORY_LIMIT: usize = 6;

const SYSTEM_PROMPT: &str = "You write short 2-4 sentence image descriptions.";

/// Asks the text backend for a 2-4 sentence description of an image prompt
#[derive(Clone)]
pub struct DescriptionGenerator {
    completion: Arc<dyn TextCompletion>,
    settings: CompletionSettings,
}

impl DescriptionGenerator {
    pub fn new(completion: Arc<dyn TextCompletion>, settings: CompletionSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Messages sent for `prompt`: system line, recent history, request
    pub fn build_messages(prompt: &str, history: &[ChatTurn]) -> Vec<CompletionMessage> {
        let mut messages = Vec::with_capacity(DESCRIPTION_HISTORY_LIMIT + 2);
        messages.push(CompletionMessage::system(SYSTEM_PROMPT));
        messages.extend(recent_turns(history, DESCRIPTION_HISTORY_LIMIT));
        messages.push(CompletionMessage::user(format!(
            "Write a short (2-4 sentence) description for this image: {}",
            prompt
        )));
        messages
    }

    /// Describe `prompt`; never fails, a placeholder carries any error
    pub async fn describe(&self, prompt: &str, history: &[ChatTurn]) -> String {
        let messages = Self::build_messages(prompt, history);

        match self
            .completion
            .complete(&self.settings.model, &messages, self.settings.temperature)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(model = %self.settings.model, "Description came back empty");
                placeholder("empty response")
            }
            Err(err) => {
                warn!(model = %self.settings.model, error = %err, "Description generation failed");
                placeholder(err)
            }
        }
    }
}

fn placeholder(detail: impl std::fmt::Display) -> String {
    format!("(Could not generate description: {})", detail)
}
