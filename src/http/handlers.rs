//! Price route handlers.
//!
//! Each handler makes at most one upstream call and maps the outcome to an
//! envelope. Upstream failures are already logged by the client.

use axum::extract::State;

use crate::http::response::{ApiResponse, HISTORY_FAILURE_MESSAGE, PRICE_FAILURE_MESSAGE};
use crate::http::server::AppState;
use crate::upstream::{CurrentPriceSnapshot, PricePoint};

/// `GET /api/btc/price`
pub async fn current_price(State(state): State<AppState>) -> ApiResponse<CurrentPriceSnapshot> {
    match state.upstream.fetch_current_price().await {
        Ok(snapshot) => ApiResponse::ok(snapshot),
        Err(_) => ApiResponse::error(PRICE_FAILURE_MESSAGE),
    }
}

/// `GET /api/btc/history`
pub async fn price_history(State(state): State<AppState>) -> ApiResponse<Vec<PricePoint>> {
    match state.upstream.fetch_price_history().await {
        Ok(history) => {
            tracing::debug!(points = history.len(), "Price history fetched");
            ApiResponse::ok(history)
        }
        Err(_) => ApiResponse::error(HISTORY_FAILURE_MESSAGE),
    }
}
