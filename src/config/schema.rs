//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream price API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5001".to_string(),
        }
    }
}

/// Upstream price API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the CoinGecko v3 API, without trailing path segments.
    pub base_url: String,

    /// API key sent with every request. Empty means no key header is sent.
    pub api_key: String,

    /// Header carrying the API key ("x-cg-demo-api-key" or "x-cg-pro-api-key").
    pub api_key_header: String,

    /// Hard timeout for a single upstream call, in seconds.
    pub timeout_secs: u64,

    /// Honor HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: String::new(),
            api_key_header: "x-cg-demo-api-key".to_string(),
            timeout_secs: 10,
            use_env_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:5001");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.upstream.api_key_header, "x-cg-demo-api-key");
        assert!(config.upstream.api_key.is_empty());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [upstream]
            api_key = "CG-test"
            timeout_secs = 3

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.api_key, "CG-test");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.upstream.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:5001");
    }
}
