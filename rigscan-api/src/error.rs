//! HTTP error mapping for rigscan-api
//!
//! Every handler returns [`ApiResult`]; failures render as the structured
//! JSON envelope `{success, error, message, details?, timestamp}` the
//! deployed clients expect. The status mapping follows the domain error
//! taxonomy; anything unexpected is a 500 with a generic message outside
//! debug builds, with full detail going to the operator log only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain error carrying the taxonomy variant
    #[error(transparent)]
    Domain(#[from] rigscan_common::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use rigscan_common::Error;

        let (status, error, message, details) = match self {
            ApiError::Domain(Error::MalformedInput { path, reason }) => (
                StatusCode::BAD_REQUEST,
                "Validation Error",
                "Invalid hardware data format".to_string(),
                Some(json!([{ "path": path, "message": reason }])),
            ),
            ApiError::Domain(Error::InvalidRequest(msg)) => {
                (StatusCode::BAD_REQUEST, "Bad Request", msg, None)
            }
            ApiError::Domain(Error::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not Found", msg, None)
            }
            ApiError::Domain(Error::Generation(msg)) => {
                tracing::error!(error = %msg, "generation capability failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Bad Gateway",
                    "Recommendation generation failed".to_string(),
                    None,
                )
            }
            ApiError::Domain(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    internal_message(&err.to_string()),
                    None,
                )
            }
            ApiError::Other(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    internal_message(&err.to_string()),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": error,
            "message": message,
            "timestamp": Utc::now(),
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

/// Full detail in debug builds only; callers never see internals in release.
fn internal_message(detail: &str) -> String {
    if cfg!(debug_assertions) {
        detail.to_string()
    } else {
        "Something went wrong".to_string()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
