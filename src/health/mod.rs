//! Liveness check.
//!
//! `/health` reports that the process is up and serving. It does not touch the
//! upstream API, so it stays healthy while the upstream is unreachable.

use axum::Json;
use chrono::{Local, SecondsFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// ISO-8601 local time with offset.
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}
