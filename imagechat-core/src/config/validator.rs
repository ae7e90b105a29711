//! Configuration validation utilities

use super::error::{ValidationError, ValidationErrorKind};
use super::schema::AppConfig;
use regex::Regex;
use std::collections::HashSet;
use std::net::SocketAddr;
use url::Url;

/// Configuration validator with additional validation rules
pub struct ConfigValidator {
    /// Pattern for `WIDTHxHEIGHT` image sizes
    size_pattern: Regex,
    /// Pattern for environment variable placeholders
    env_var_pattern: Regex,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            size_pattern: Regex::new(r"^([1-9][0-9]*)x([1-9][0-9]*)$").unwrap(),
            env_var_pattern: Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap(),
        }
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &AppConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_unresolved_placeholders(config)?;
        self.validate_base_url(config)?;
        self.validate_image_models(config)?;
        self.validate_image_size(config)?;
        self.validate_bind_address(config)?;

        Ok(())
    }

    /// A `${VAR}` left in the key means interpolation was skipped
    fn validate_unresolved_placeholders(&self, config: &AppConfig) -> Result<(), ValidationError> {
        if self.env_var_pattern.is_match(config.api_key.expose_secret()) {
            return Err(ValidationError::new(
                "api_key",
                ValidationErrorKind::UnresolvedPlaceholder,
            ));
        }
        Ok(())
    }

    fn validate_base_url(&self, config: &AppConfig) -> Result<(), ValidationError> {
        let url = Url::parse(&config.base_url)
            .map_err(|e| ValidationError::bad_url("base_url", e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ValidationError::bad_url(
                "base_url",
                format!("unsupported scheme '{}'", other),
            )),
        }
    }

    /// Model ids must be non-empty and unique; order is the fallback order
    fn validate_image_models(&self, config: &AppConfig) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (i, model) in config.image_models.iter().enumerate() {
            if model.trim().is_empty() {
                return Err(ValidationError::missing(format!("image_models[{i}]")));
            }
            if !seen.insert(model.as_str()) {
                return Err(ValidationError::new(
                    format!("image_models[{i}]"),
                    ValidationErrorKind::Duplicate {
                        value: model.clone(),
                    },
                ));
            }
        }
        Ok(())
    }

    fn validate_image_size(&self, config: &AppConfig) -> Result<(), ValidationError> {
        let size = &config.image_size;
        let square = self
            .size_pattern
            .captures(size)
            .is_some_and(|caps| caps[1] == caps[2]);

        if square {
            Ok(())
        } else {
            Err(ValidationError::new(
                "image_size",
                ValidationErrorKind::NotSquare { size: size.clone() },
            ))
        }
    }

    fn validate_bind_address(&self, config: &AppConfig) -> Result<(), ValidationError> {
        match config.bind_address.parse::<SocketAddr>() {
            Ok(_) => Ok(()),
            Err(e) => Err(ValidationError::malformed(
                "bind_address",
                format!("{e}; expected host:port such as 127.0.0.1:8000"),
            )),
        }
    }
}
