use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Error surface of the seed/reset endpoints.
///
/// Bodies follow the tool's wire contract: `{"status":"error","message":…}`,
/// with the raw driver message attached under `error` for connection
/// failures. This is a developer-facing tool, so messages go out verbatim.
#[derive(Debug)]
pub enum ApiError {
    /// Database unreachable; carries the underlying driver message.
    Connection(String),

    /// Seed transaction failed and was rolled back.
    Seed(String),

    /// Schema reset (migration replay) failed.
    Reset(String),

    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Connection(msg) => write!(f, "Database connection failed: {}", msg),
            ApiError::Seed(msg) => write!(f, "Seed failed: {}", msg),
            ApiError::Reset(msg) => write!(f, "Reset failed: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Connection(msg) => {
                tracing::error!("Database connection failed: {}", msg);
                json!({
                    "status": "error",
                    "message": "Database connection failed",
                    "error": msg,
                })
            }
            ApiError::Seed(msg) => {
                tracing::error!("Seed failed (rolled back): {}", msg);
                json!({ "status": "error", "message": msg })
            }
            ApiError::Reset(msg) => {
                tracing::error!("Schema reset failed: {}", msg);
                json!({ "status": "error", "message": msg })
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                json!({ "status": "error", "message": msg })
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{err:#}"))
    }
}
