//! BTC dashboard backend library.
//!
//! Proxies CoinGecko's Bitcoin price endpoints behind a small JSON API with a
//! uniform `{success, data | message}` envelope.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::CoinGeckoClient;
