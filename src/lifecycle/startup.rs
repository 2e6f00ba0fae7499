//! Startup orchestration.
//!
//! Fail fast: any error before the listener is bound ends the process.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Bring up the service and serve until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    if config.upstream.api_key.is_empty() {
        tracing::warn!("No upstream API key configured; requests will be sent without one");
    }

    let server = HttpServer::new(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
