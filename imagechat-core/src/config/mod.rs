//! Configuration module for imagechat
//!
//! This module provides the configuration schema, loading and validation.
//! Configuration comes either from process environment variables (optionally
//! seeded from a `.env` file) or from a YAML/JSON file with `${VAR}`
//! interpolation. A missing API key is fatal at startup.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{
    interpolate_env_vars, parse_dotenv, read_dotenv, API_KEY_VAR, BASE_URL_VAR,
    BIND_ADDRESS_VAR, CHAT_MODEL_VAR, FETCH_TIMEOUT_VAR, IMAGE_MODELS_VAR, IMAGE_SIZE_VAR,
    REQUEST_TIMEOUT_VAR,
};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::AppConfig;
pub use secrets::SecretString;
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Parser failure position and message, format agnostic
struct ParseFailure {
    line: Option<usize>,
    column: Option<usize>,
    message: String,
}

/// Read, interpolate `${VAR}`s, parse and validate a config file
fn load_with<F>(path: &Path, parse: F) -> ConfigResult<AppConfig>
where
    F: FnOnce(&str) -> Result<AppConfig, ParseFailure>,
{
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse(&env::interpolate_env_vars(&raw)?).map_err(|failure| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            line: failure.line,
            column: failure.column,
            message: failure.message,
        }
    })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<AppConfig> {
    load_with(path.as_ref(), |text| {
        serde_yaml::from_str(text).map_err(|e| ParseFailure {
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })
    })
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<AppConfig> {
    load_with(path.as_ref(), |text| {
        serde_json::from_str(text).map_err(|e| ParseFailure {
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })
    })
}

/// Load `.json`, `.yaml` or `.yml`
pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<AppConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_from_json(path),
        Some("yaml" | "yml") => load_from_yaml(path),
        other => Err(ConfigError::Invalid {
            message: format!(
                "unsupported config extension {:?} for '{}'",
                other,
                path.display()
            ),
        }),
    }
}
