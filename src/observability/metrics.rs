//! Metrics collection and exposition.
//!
//! # Metrics
//! - `btc_dashboard_requests_total` (counter): inbound requests by method, route, status
//! - `btc_dashboard_request_duration_seconds` (histogram): inbound latency
//! - `btc_dashboard_upstream_requests_total` (counter): upstream calls by endpoint, outcome
//! - `btc_dashboard_upstream_duration_seconds` (histogram): upstream latency

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "btc_dashboard_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "btc_dashboard_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call.
pub fn record_upstream(endpoint: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "btc_dashboard_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("btc_dashboard_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Axum middleware recording every request against its matched route.
pub async fn track_requests(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
