use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use margin_sdk::MarginError;
use serde_json::json;
use tracing::error;

/// Message returned for every unexpected failure. Details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    /// A 500 with the generic message; `cause` is logged, never returned.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!("internal error: {cause}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<MarginError> for AppError {
    fn from(e: MarginError) -> Self {
        match e {
            MarginError::InvalidDateRange(msg) | MarginError::InvalidArgument(msg) => {
                AppError::bad_request(msg)
            }
            MarginError::NotFound(msg) => AppError::not_found(msg),
            other => AppError::internal(other),
        }
    }
}
