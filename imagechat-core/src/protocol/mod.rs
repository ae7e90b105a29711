//! Protocol module for chat request/response structures
//!
//! This module defines the data models shared by the classifier, the
//! providers and the request router. These structures are designed to be:
//! - Stateless (nothing outlives one request)
//! - Serializable in the shape the chat UI already speaks

pub mod types;

pub use types::{
    recent_turns, ChatRequest, ChatResponse, ChatTurn, CompletionMessage, GeneratedImage,
    ImageResult, MessageRole,
};
