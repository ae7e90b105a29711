//! Normal conversational replies

use super::CompletionSettings;
use crate::protocol::types::{recent_turns, ChatTurn, CompletionMessage};
use crate::providers::adapter::TextCompletion;
use std::sync::Arc;
use tracing::warn;

/// Maximum history turns forwarded to the chat model
pub const CONVERSATION_HISTORY_LIMIT: usize = 20;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Produces the assistant's reply for a text message
#[derive(Clone)]
pub struct ConversationResponder {
    completion: Arc<dyn TextCompletion>,
    settings: CompletionSettings,
}

impl ConversationResponder {
    pub fn new(completion: Arc<dyn TextCompletion>, settings: CompletionSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    pub fn build_messages(message: &str, history: &[ChatTurn]) -> Vec<CompletionMessage> {
        let mut messages = Vec::with_capacity(CONVERSATION_HISTORY_LIMIT + 2);
        messages.push(CompletionMessage::system(SYSTEM_PROMPT));
        messages.extend(recent_turns(history, CONVERSATION_HISTORY_LIMIT));
        messages.push(CompletionMessage::user(message));
        messages
    }

    /// Reply to `message`; a failed completion yields an apology string
    pub async fn respond(&self, message: &str, history: &[ChatTurn]) -> String {
        let messages = Self::build_messages(message, history);

        match self
            .completion
            .complete(&self.settings.model, &messages, self.settings.temperature)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(model = %self.settings.model, error = %err, "Chat completion failed");
                format!("Sorry, chat generation failed: {}", err)
            }
        }
    }
}
