//! OpenAI provider implementation
//!
//! This module provides an adapter for the OpenAI API, implementing the text
//! completion, image generation and speech capabilities over its REST surface.

mod client;
pub mod types;

pub use client::{OpenAIProvider, DEFAULT_BASE_URL};
pub use types::{OpenAIChatResponse, OpenAIImageResponse};
