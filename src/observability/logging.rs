//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber once at startup
//! - Pick the log level from `RUST_LOG`, falling back to config
//! - Emit pretty lines for development, JSON for production

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default directives when `RUST_LOG` is unset.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "btc_dashboard={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init(),
    }
}
