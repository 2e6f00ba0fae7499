//! Response envelope and JSON response construction.
//!
//! # Responsibilities
//! - Wrap route results in `{success, data}` / `{success, message}`
//! - Serialize bodies as `application/json`
//! - Map handler faults (serialization failure, panic) to a generic 500
//!
//! # Design Decisions
//! - `data` and `message` are mutually exclusive; only the constructors can build an envelope
//! - Error detail is logged, never written to the response body

use std::any::Any;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failure message for the current-price route.
pub const PRICE_FAILURE_MESSAGE: &str = "获取价格数据失败";

/// Failure message for the price-history route.
pub const HISTORY_FAILURE_MESSAGE: &str = "获取历史数据失败";

/// Generic message for unexpected handler faults.
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

/// Uniform wrapper around every data-route response.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// An envelope paired with the status it is sent with.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// HTTP 200 with `{success: true, data}`.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope::success(data),
        }
    }

    /// HTTP 500 with `{success: false, message}`.
    pub fn error(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: Envelope::failure(message),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.envelope) {
            Ok(body) => json_response(self.status, body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response envelope");
                internal_error()
            }
        }
    }
}

/// HTTP 500 with the generic internal-error envelope.
pub fn internal_error() -> Response {
    let body = format!(
        r#"{{"success":false,"message":"{}"}}"#,
        INTERNAL_ERROR_MESSAGE
    );
    json_response(StatusCode::INTERNAL_SERVER_ERROR, body.into_bytes())
}

/// Convert a caught handler panic into the generic internal-error response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");
    internal_error()
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_data_and_message_exclusive() {
        let ok = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": [1, 2]}));

        let err = serde_json::to_value(Envelope::<()>::failure("boom")).unwrap();
        assert_eq!(err, serde_json::json!({"success": false, "message": "boom"}));
    }

    #[test]
    fn test_empty_data_still_present() {
        let ok = serde_json::to_value(Envelope::success(Vec::<u8>::new())).unwrap();
        assert_eq!(ok["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_error_response() {
        let response = ApiResponse::<()>::error(PRICE_FAILURE_MESSAGE).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], PRICE_FAILURE_MESSAGE);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("secret internal detail"))
        }
    }

    #[tokio::test]
    async fn test_serialization_failure_is_generic() {
        let response = ApiResponse::ok(Unserializable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!json.to_string().contains("secret internal detail"));
    }

    #[tokio::test]
    async fn test_panic_response_hides_detail() {
        let response = handle_panic(Box::new("index out of bounds at src/foo.rs:1"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("data").is_none());
    }
}
