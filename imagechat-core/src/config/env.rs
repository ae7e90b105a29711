//! Environment handling for configuration
//!
//! Covers `${VAR}` interpolation in config files, `.env` parsing and building
//! an [`AppConfig`] straight from process variables.

use super::error::ConfigError;
use super::schema::AppConfig;
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Variable holding the provider key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const CHAT_MODEL_VAR: &str = "IMAGECHAT_CHAT_MODEL";
pub const IMAGE_MODELS_VAR: &str = "IMAGECHAT_IMAGE_MODELS";
pub const IMAGE_SIZE_VAR: &str = "IMAGECHAT_IMAGE_SIZE";
pub const FETCH_TIMEOUT_VAR: &str = "IMAGECHAT_FETCH_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_VAR: &str = "IMAGECHAT_REQUEST_TIMEOUT_SECS";
pub const BIND_ADDRESS_VAR: &str = "IMAGECHAT_BIND_ADDRESS";

/// Interpolate environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let env_var_pattern = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = content.to_string();

    for cap in env_var_pattern.captures_iter(content) {
        let full_match = cap.get(0).unwrap().as_str();
        let var_name = &cap[1];

        match env::var(var_name) {
            Ok(value) => {
                result = result.replace(full_match, &value);
            }
            Err(_) => {
                return Err(ConfigError::EnvVarNotFound {
                    var: var_name.to_string(),
                });
            }
        }
    }

    Ok(result)
}

/// Parse `KEY=VALUE` lines of a `.env` file
pub fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for raw_line in content.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("export ") {
            line = stripped.trim();
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let mut value = value.trim();
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

/// Read a `.env` file without touching the process environment
///
/// A missing file yields no variables.
pub fn read_dotenv<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_dotenv(&content))
}

/// Non-blank values from `primary`, then whatever the `.env` file set
fn layered<'a, F>(
    primary: F,
    dotenv: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key: &str| {
        primary(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| dotenv.get(key).cloned())
    }
}

impl AppConfig {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from process variables, falling back to `dotenv`
    ///
    /// Process variables win over the file.
    pub fn from_env_with_dotenv(dotenv: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(layered(|key| env::var(key).ok(), dotenv))
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or_else(|| ConfigError::MissingApiKey {
            var: API_KEY_VAR.to_string(),
        })?;

        let mut config = AppConfig::new(api_key.trim());

        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(chat_model) = get(CHAT_MODEL_VAR) {
            config.chat_model = chat_model;
        }
        if let Some(models) = get(IMAGE_MODELS_VAR) {
            config.image_models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(size) = get(IMAGE_SIZE_VAR) {
            config.image_size = size;
        }
        if let Some(value) = get(FETCH_TIMEOUT_VAR) {
            config.fetch_timeout_secs = parse_var(FETCH_TIMEOUT_VAR, &value)?;
        }
        if let Some(value) = get(REQUEST_TIMEOUT_VAR) {
            config.request_timeout_secs = parse_var(REQUEST_TIMEOUT_VAR, &value)?;
        }
        if let Some(bind_address) = get(BIND_ADDRESS_VAR) {
            config.bind_address = bind_address;
        }

        super::ConfigValidator::new().validate(&config)?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        message: format!("{} must be a number, got '{}'", var, value),
    })
}
