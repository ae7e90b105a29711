//! Provider abstraction and image fallback
//!
//! This module defines the outbound capabilities the core depends on, the
//! OpenAI implementation of them, and the ordered fallback driver used for
//! image generation.

pub mod adapter;
pub mod error;
pub mod fallback;
pub mod openai;

pub use adapter::{ImageFetcher, ImageGeneration, SpeechSynthesis, TextCompletion};
pub use error::{ProviderError, ProviderResult};
pub use fallback::{FailedAttempt, FallbackReport, ImageFallback};

// Re-export concrete providers
pub use openai::OpenAIProvider;
