//! BTC dashboard backend.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ http::handlers ──┐        │
//!                           │   (CORS, request id,                │        │
//!                           │    trace, panic guard)              ▼        │
//!                           │                           upstream::client ──┼──▶ CoinGecko
//!     Client Response       │                                     │        │
//!     ◀─────────────────────┼── http::response (envelope) ◀───────┘        │
//!                           │                                              │
//!                           │   config · observability · lifecycle · health│
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use btc_dashboard::config::load_config;
use btc_dashboard::lifecycle::startup;
use btc_dashboard::observability::logging;

#[derive(Parser)]
#[command(name = "btc-dashboard")]
#[command(about = "Bitcoin price API backed by CoinGecko", version)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "BTC_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("btc-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
