//! Core protocol types for chat and image interactions
//!
//! This module contains the data structures exchanged between the chat UI and
//! the core, plus the small message model used when talking to text
//! completion backends. The design prioritizes:
//! - An explicit discriminant on every response (no null-checking)
//! - Wire compatibility with the existing UI payloads
//! - Tolerance for extra fields the UI keeps on history turns

use serde::{Deserialize, Serialize};

/// One line of prior conversation, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatTurn {
    /// Whether the turn was written by the user (otherwise the assistant)
    #[serde(default)]
    pub is_user: bool,

    /// Text of the turn
    #[serde(default)]
    pub text: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            is_user: true,
            text: text.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            is_user: false,
            text: text.into(),
        }
    }
}

/// Inbound chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatRequest {
    /// The new user message
    #[serde(default)]
    pub message: String,

    /// Prior conversation supplied by the caller
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl ChatRequest {
    /// Create a request with the given message and history
    pub fn new(message: impl Into<String>, history: Vec<ChatTurn>) -> Self {
        Self {
            message: message.into(),
            history,
        }
    }
}

/// Outcome of the image fallback driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageResult {
    /// One backend produced an image
    Success {
        /// Base64 encoded image bytes
        encoded_image: String,
        /// Backend model identifier that succeeded
        model_used: String,
    },
    /// Every backend failed
    Failure {
        /// Human readable failure detail
        error: String,
    },
}

impl ImageResult {
    /// Whether this result carries an image
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Structured response returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatResponse {
    /// Plain text reply
    #[serde(rename = "text")]
    TextResponse { response: String },

    /// Generated image with a short caption
    #[serde(rename = "image")]
    ImageResponse {
        #[serde(rename = "image_base64")]
        encoded_image: String,
        description: String,
        model_used: String,
    },

    /// Image generation failed on every backend
    #[serde(rename = "error")]
    ErrorResponse { message: String },
}

impl ChatResponse {
    /// Create a text response
    pub fn text(response: impl Into<String>) -> Self {
        Self::TextResponse {
            response: response.into(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self::ErrorResponse {
            message: message.into(),
        }
    }

    /// Wire name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextResponse { .. } => "text",
            Self::ImageResponse { .. } => "image",
            Self::ErrorResponse { .. } => "error",
        }
    }
}

/// Role of a message sent to a text completion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
}

impl MessageRole {
    /// Map a history turn's author flag to a role
    pub fn from_is_user(is_user: bool) -> Self {
        if is_user {
            Self::User
        } else {
            Self::Assistant
        }
    }
}

/// A message in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl CompletionMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for CompletionMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: MessageRole::from_is_user(turn.is_user),
            content: turn.text.clone(),
        }
    }
}

/// Convert the trailing `limit` turns of a history into completion messages
pub fn recent_turns(history: &[ChatTurn], limit: usize) -> impl Iterator<Item = CompletionMessage> + '_ {
    let start = history.len().saturating_sub(limit);
    history[start..].iter().map(CompletionMessage::from)
}

/// Shape of an image returned by an image generation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Base64 payload returned inline
    Inline { b64: String },
    /// URL the image must be downloaded from
    Remote { url: String },
    /// Neither field was present
    Unrecognized,
}
