//! Upstream payloads, the reshaped price types and upstream errors.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// CoinGecko asset id for Bitcoin.
pub const ASSET_ID: &str = "bitcoin";

/// Quote currency for every request.
pub const VS_CURRENCY: &str = "usd";

/// Size of the history window, in days.
pub const HISTORY_DAYS: u32 = 7;

/// Display format for `PricePoint::date`, rendered in local time.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection, TLS, or other transport failure.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Upstream answered but the payload did not have the expected shape.
    #[error("malformed upstream data: {0}")]
    Malformed(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl UpstreamError {
    /// Coarse classification used in logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) | UpstreamError::Transport(_) | UpstreamError::Status(_) => {
                "unavailable"
            }
            UpstreamError::Malformed(_) => "malformed",
            UpstreamError::Client(_) => "client",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// One asset entry of the `/simple/price` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
    pub usd_24h_change: Option<f64>,
    pub last_updated_at: Option<i64>,
}

/// `/simple/price` response, keyed by asset id.
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

/// `/coins/{id}/market_chart` response. Only `prices` is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(Number, f64)>,
}

/// Current price of the asset at a single point in time.
///
/// Fields the upstream did not provide serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPriceSnapshot {
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub last_updated: Option<i64>,
}

impl CurrentPriceSnapshot {
    /// Pick the asset entry out of a `/simple/price` response.
    ///
    /// A missing asset entry yields a snapshot with every field absent.
    pub fn from_response(mut response: SimplePriceResponse) -> Self {
        let entry = response.remove(ASSET_ID).unwrap_or_default();
        Self {
            price: entry.usd,
            change_24h: entry.usd_24h_change,
            last_updated: entry.last_updated_at,
        }
    }
}

/// One sample of the price history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Unix milliseconds, exactly as sent by the upstream.
    pub timestamp: Number,
    /// `timestamp` rendered as `YYYY-MM-DD HH:MM` in local time.
    pub date: String,
    /// Price rounded to 2 decimals.
    pub price: f64,
}

impl PricePoint {
    pub fn from_sample(timestamp: Number, price: f64) -> UpstreamResult<Self> {
        // Fractional milliseconds only affect the display string, which has minute precision.
        let millis = timestamp
            .as_i64()
            .or_else(|| timestamp.as_f64().map(|ms| ms.trunc() as i64));
        let date = millis
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                UpstreamError::Malformed(format!("timestamp out of range: {}", timestamp))
            })?
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string();

        Ok(Self {
            timestamp,
            date,
            price: round2(price),
        })
    }
}

/// Convert a market chart response into price points, keeping upstream order.
pub fn history_from_response(response: MarketChartResponse) -> UpstreamResult<Vec<PricePoint>> {
    response
        .prices
        .into_iter()
        .map(|(ts, price)| PricePoint::from_sample(ts, price))
        .collect()
}

/// Round the stored value to 2 fractional digits, ties to even.
///
/// Formatting rounds the exact binary value, so `2.675` (stored as 2.67499...)
/// gives 2.67 and `0.125` gives 0.12. Scaling by 100 first would not.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
