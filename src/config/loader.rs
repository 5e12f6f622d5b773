//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override the upstream secrets.
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_NAME: &str = "AIRTABLE_TABLE_NAME";
pub const ENV_ACCESS_TOKEN: &str = "AIRTABLE_ACCESS_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, apply environment overrides and validate configuration.
///
/// Without a path the built-in defaults are used, so a deployment can be
/// configured from the environment alone.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let config: RelayConfig = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RelayConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay secrets from `lookup` (normally the process environment).
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> RelayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(base_id) = get(ENV_BASE_ID) {
        config.upstream.base_id = base_id;
    }
    if let Some(table_name) = get(ENV_TABLE_NAME) {
        config.upstream.table_name = table_name;
    }
    if let Some(token) = get(ENV_ACCESS_TOKEN) {
        config.upstream.access_token = token;
    }
    config
}
