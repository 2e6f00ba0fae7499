//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing, panic recovery)
//!     → handlers.rs (one upstream call per request)
//!     → response.rs (envelope, JSON body, status code)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ApiResponse, Envelope};
pub use server::{AppState, HttpServer};
