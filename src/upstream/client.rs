//! CoinGecko HTTP client with timeout and error normalization.
//!
//! # Responsibilities
//! - Issue the two fixed upstream requests (simple price, market chart)
//! - Attach the API key header and enforce the request timeout
//! - Turn transport, status and parse failures into `UpstreamError`
//! - Log every failure with its cause

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::types::{
    history_from_response, CurrentPriceSnapshot, MarketChartResponse, PricePoint,
    SimplePriceResponse, UpstreamError, UpstreamResult, ASSET_ID, HISTORY_DAYS, VS_CURRENCY,
};

/// Client for the CoinGecko v3 REST API.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    timeout_secs: u64,
}

impl CoinGeckoClient {
    /// Build a client from upstream configuration.
    ///
    /// The API key header is installed as a default header so every request carries it.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !config.api_key.is_empty() {
            let name = HeaderName::from_bytes(config.api_key_header.as_bytes())
                .map_err(|e| UpstreamError::Client(format!("invalid API key header: {}", e)))?;
            let mut value = HeaderValue::from_str(&config.api_key)
                .map_err(|e| UpstreamError::Client(format!("invalid API key: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .user_agent(concat!("btc-dashboard/", env!("CARGO_PKG_VERSION")));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Fetch the current BTC/USD price with 24h change and last-update time.
    pub async fn fetch_current_price(&self) -> UpstreamResult<CurrentPriceSnapshot> {
        let response: SimplePriceResponse = self
            .get_json(
                "simple_price",
                "simple/price",
                &[
                    ("ids", ASSET_ID.to_string()),
                    ("vs_currencies", VS_CURRENCY.to_string()),
                    ("include_24hr_change", "true".to_string()),
                    ("include_last_updated_at", "true".to_string()),
                ],
            )
            .await?;

        Ok(CurrentPriceSnapshot::from_response(response))
    }

    /// Fetch the last 7 days of BTC/USD prices, oldest first as returned upstream.
    pub async fn fetch_price_history(&self) -> UpstreamResult<Vec<PricePoint>> {
        let path = format!("coins/{}/market_chart", ASSET_ID);
        let response: MarketChartResponse = self
            .get_json(
                "market_chart",
                &path,
                &[
                    ("vs_currency", VS_CURRENCY.to_string()),
                    ("days", HISTORY_DAYS.to_string()),
                ],
            )
            .await?;

        history_from_response(response).inspect_err(|e| {
            tracing::error!(endpoint = "market_chart", kind = e.kind(), error = %e, "Upstream data rejected");
        })
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> UpstreamResult<T> {
        let start = Instant::now();
        let url = format!("{}/{}", self.base_url, path);

        tracing::debug!(endpoint, url = %url, "Calling upstream");

        let result: UpstreamResult<T> = self.send(&url, query).await;
        metrics::record_upstream(
            endpoint,
            match &result {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            },
            start,
        );

        if let Err(e) = &result {
            tracing::error!(
                endpoint,
                kind = e.kind(),
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream request failed"
            );
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> UpstreamResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout_secs)
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for CoinGeckoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
