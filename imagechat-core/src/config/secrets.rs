//! API key wrapper
//!
//! Formatting a [`SecretString`] never prints the key. Serialization keeps the
//! real value so a loaded config can be written back out.

use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// Shortest key for which a head/tail hint is shown
const MIN_HINT_LEN: usize = 9;

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key, for building the `Authorization` header
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// True when the key is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// A loggable hint such as `sk-...cdef`; short keys are fully hidden
    pub fn partial_redact(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.is_empty() {
            return "[EMPTY]".to_string();
        }
        if chars.len() < MIN_HINT_LEN {
            return REDACTED.to_string();
        }

        let (head, tail) = if self.0.starts_with("sk-") { (3, 4) } else { (2, 2) };
        let prefix: String = chars[..head].iter().collect();
        let suffix: String = chars[chars.len() - tail..].iter().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
