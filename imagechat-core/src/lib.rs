//! Imagechat Core Library
//!
//! This crate classifies chat messages as text or image requests, dispatches
//! them to a generative AI provider and shapes a structured response.
//! Image generation walks an ordered list of models until one succeeds.

pub mod chat;
pub mod config;
pub mod http;
pub mod intent;
pub mod protocol;
pub mod providers;
pub mod speech;

pub use chat::RequestRouter;
pub use config::AppConfig;
pub use intent::{wants_image, Intent, IntentClassifier};
pub use protocol::{ChatRequest, ChatResponse, ChatTurn, ImageResult};

/// Returns the version of the Imagechat Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
