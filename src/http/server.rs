//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, panic recovery, metrics)
//! - Inject the upstream client into handlers via state
//! - Bind server to listener and serve until shutdown

use axum::{
    body::Body,
    http::{Method, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::health::health_check;
use crate::http::handlers::{current_price, price_history};
use crate::http::request::X_REQUEST_ID;
use crate::http::response::handle_panic;
use crate::observability::metrics;
use crate::upstream::{CoinGeckoClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<CoinGeckoClient>,
}

/// HTTP server for the dashboard API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server, building the upstream client from `config`.
    pub fn new(config: &ServiceConfig) -> UpstreamResult<Self> {
        let upstream = CoinGeckoClient::new(&config.upstream)?;
        Ok(Self::with_client(config, upstream))
    }

    /// Create a server around an already constructed upstream client.
    pub fn with_client(config: &ServiceConfig, upstream: CoinGeckoClient) -> Self {
        tracing::info!(
            upstream = %upstream.base_url(),
            timeout_secs = config.upstream.timeout_secs,
            api_key_configured = !config.upstream.api_key.is_empty(),
            "Upstream client ready"
        );

        let state = AppState {
            upstream: Arc::new(upstream),
        };
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let routes = Router::new()
            .route("/api/btc/price", get(current_price))
            .route("/api/btc/history", get(price_history))
            .route("/health", get(health_check))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state);

        Self::with_layers(routes)
    }

    /// Wrap `routes` in the middleware stack shared by every route.
    fn with_layers(routes: Router) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any);

        routes
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors)
    }

    /// The fully layered router, for serving on a custom transport.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
