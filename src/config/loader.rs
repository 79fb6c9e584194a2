//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::DelegateConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `upstream.api_key`.
pub const API_KEY_ENV: &str = "DELEGATE_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// A non-empty `DELEGATE_API_KEY` takes precedence over the file's key.
pub fn load_config(path: &Path) -> Result<DelegateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    load_config_from_str(&content, std::env::var(API_KEY_ENV).ok())
}

/// Parse, apply the API key override, then validate.
pub fn load_config_from_str(
    content: &str,
    api_key_override: Option<String>,
) -> Result<DelegateConfig, ConfigError> {
    let mut config: DelegateConfig = toml::from_str(content)?;

    if let Some(key) = api_key_override.filter(|k| !k.is_empty()) {
        config.upstream.api_key = key;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
