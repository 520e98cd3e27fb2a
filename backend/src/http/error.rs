//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request body
    BadRequest(String),
    /// Chart computation failure
    Chart(ChartError),
}

/// HTTP status for a chart error.
pub fn status_for(err: &ChartError) -> StatusCode {
    match err {
        ChartError::MissingField { .. } | ChartError::Parse { .. } => StatusCode::BAD_REQUEST,
        ChartError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
        ChartError::UnknownTimezone { .. }
        | ChartError::Geocoding { .. }
        | ChartError::EphemerisUnavailable { .. } => StatusCode::BAD_GATEWAY,
        ChartError::MissingBody { .. } | ChartError::Configuration { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_REQUEST", msg),
            ),
            AppError::Chart(e) => (status_for(&e), ApiError::new(e.code(), e.to_string())),
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.error);
        }

        (status, Json(error)).into_response()
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::Chart(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
