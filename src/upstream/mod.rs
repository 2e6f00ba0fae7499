//! Upstream price API subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (GET with API key header and timeout)
//!     → CoinGecko v3 (/simple/price, /coins/bitcoin/market_chart)
//!     → types.rs (deserialize, reshape into snapshot / price points)
//!     → Result<_, UpstreamError> back to the handler
//! ```
//!
//! # Design Decisions
//! - Asset (bitcoin), quote currency (usd) and window (7 days) are fixed
//! - Missing individual fields degrade to absent values, not errors
//! - No retries: a failed call fails that one request

pub mod client;
pub mod types;

pub use client::CoinGeckoClient;
pub use types::{CurrentPriceSnapshot, PricePoint, UpstreamError, UpstreamResult};
