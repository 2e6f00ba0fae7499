//! Request identification.
//!
//! Every request carries an `x-request-id`. A caller-supplied value is kept;
//! otherwise `SetRequestIdLayer` generates a UUID v4. The id is echoed on the
//! response and recorded on the request's tracing span.

use axum::http::HeaderName;

/// Header carrying the request id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
