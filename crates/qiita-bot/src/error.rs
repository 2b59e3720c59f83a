//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Qiita error: {0}")]
    Qiita(#[from] qiita_client::QiitaError),

    #[error("LINE error: {0}")]
    Line(#[from] line_client::LineError),

    #[error("Invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Missing capture group for command: {0}")]
    MissingCapture(&'static str),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidSignature => (StatusCode::BAD_REQUEST, "SIGNATURE_INVALID"),
            AppError::Payload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
            AppError::Qiita(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            AppError::Line(_) => (StatusCode::BAD_GATEWAY, "LINE_API_ERROR"),
            AppError::Config(_) | AppError::Pattern(_) | AppError::MissingCapture(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
