//! Heuristic image-intent classifier
//!
//! Decides whether a chat message asks for a picture. Rules are checked in
//! order and the first match wins:
//! 1. blank text is never an image request
//! 2. an explicit `image:` / `picture:` / `photo:` prefix
//! 3. a whole-word verb (draw, create, ...) together with a whole-word noun (image, photo, ...)
//! 4. one of a few short trigger phrases anywhere in the text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const PREFIXES: [&str; 3] = ["image:", "picture:", "photo:"];

const SHORT_TRIGGERS: [&str; 6] = [
    "draw ",
    "create ",
    "generate ",
    "image of",
    "picture of",
    "photo of",
];

static VERB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(draw|create|generate|show|make|render)\b").expect("valid verb pattern")
});

static NOUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(image|picture|photo|portrait|illustration|render)\b")
        .expect("valid noun pattern")
});

/// What the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// A normal conversational reply
    Text,
    /// A generated image
    Image,
}

/// Returns true if `text` should be handled as an image generation request
pub fn wants_image(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }

    if PREFIXES.iter().any(|prefix| normalized.starts_with(prefix)) {
        return true;
    }

    if VERB_PATTERN.is_match(&normalized) && NOUN_PATTERN.is_match(&normalized) {
        return true;
    }

    SHORT_TRIGGERS
        .iter()
        .any(|trigger| normalized.contains(trigger))
}

/// Stateless classifier handle for callers that prefer an object
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Intent {
        if wants_image(text) {
            Intent::Image
        } else {
            Intent::Text
        }
    }
}
