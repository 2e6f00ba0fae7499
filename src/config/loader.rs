//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_BIND_ADDRESS: &str = "BTC_DASHBOARD_BIND_ADDRESS";
pub const ENV_UPSTREAM_URL: &str = "BTC_DASHBOARD_UPSTREAM_URL";
pub const ENV_API_KEY: &str = "BTC_DASHBOARD_API_KEY";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "BTC_DASHBOARD_UPSTREAM_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "BTC_DASHBOARD_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

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

/// Load configuration: optional TOML file, then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    let config = apply_overrides(config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document into a config without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay values from `lookup` (normally the process environment) onto `config`.
pub fn apply_overrides<F>(mut config: ServiceConfig, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(url) = lookup(ENV_UPSTREAM_URL) {
        config.upstream.base_url = url;
    }
    if let Some(key) = lookup(ENV_API_KEY) {
        config.upstream.api_key = key;
    }
    if let Some(secs) = lookup(ENV_UPSTREAM_TIMEOUT_SECS) {
        config.upstream.timeout_secs = secs.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_UPSTREAM_TIMEOUT_SECS,
            value: secs.clone(),
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }

    Ok(config)
}
