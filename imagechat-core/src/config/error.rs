//! Configuration errors
//!
//! Every variant is fatal at startup: the server logs it and exits before
//! serving a request.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config '{}'{}: {message}", .path.display(), location(.line, .column))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Environment variable '{var}' referenced in config is not set")]
    EnvVarNotFound { var: String },

    #[error("Missing {var} in environment or .env")]
    MissingApiKey { var: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at {line}:{column}"),
        (Some(line), None) => format!(" at line {line}"),
        _ => String::new(),
    }
}

/// A configuration value that failed validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid `{field}`: {kind}")]
pub struct ValidationError {
    /// Offending field, e.g. `image_models[1]`
    pub field: String,
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("value is required")]
    Missing,

    #[error("{message}")]
    OutOfRange { message: String },

    #[error("{message}")]
    Malformed { message: String },

    #[error("'{size}' is not a square WIDTHxHEIGHT size")]
    NotSquare { size: String },

    #[error("'{value}' is listed more than once")]
    Duplicate { value: String },

    #[error("bad URL: {message}")]
    BadUrl { message: String },

    #[error("contains an unresolved ${{VAR}} placeholder")]
    UnresolvedPlaceholder,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Missing)
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::OutOfRange {
                message: message.into(),
            },
        )
    }

    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::Malformed {
                message: message.into(),
            },
        )
    }

    pub fn bad_url(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::BadUrl {
                message: message.into(),
            },
        )
    }
}
