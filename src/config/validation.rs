//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that upstream URL and key header are usable by the HTTP client
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream.base_url '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid upstream.api_key_header '{0}'")]
    InvalidKeyHeader(String),

    #[error("upstream.api_key contains characters not allowed in a header")]
    InvalidApiKey,
}

/// Check a loaded configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
            e.to_string(),
        )),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if HeaderName::from_bytes(config.upstream.api_key_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidKeyHeader(
            config.upstream.api_key_header.clone(),
        ));
    }

    if HeaderValue::from_str(&config.upstream.api_key).is_err() {
        errors.push(ValidationError::InvalidApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.base_url = "ftp://example.com".into();
        config.upstream.timeout_secs = 0;
        config.upstream.api_key_header = "bad header".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidBaseUrl(_, reason) if reason.contains("ftp"))));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "invalid observability.metrics_address 'nowhere': not a socket address"
        );
    }

    #[test]
    fn test_api_key_with_newline_rejected() {
        let mut config = ServiceConfig::default();
        config.upstream.api_key = "CG-abc\n".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidApiKey]
        );
    }
}
