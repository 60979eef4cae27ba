use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only request validation and document extraction reach this type. Model-backed
/// stages never fail outward; they resolve to their fallback payloads.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request must be JSON")]
    UnsupportedMediaType,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(tag) => AppError::UnsupportedFormat(tag),
            // Temp-file failures are ours, not the client's document.
            err @ ExtractionError::Io(_) => AppError::Internal(anyhow::Error::new(err)),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::UnsupportedMediaType => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_MEDIA_TYPE",
                self.to_string(),
            ),
            AppError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD", self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Document extraction failed: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "EXTRACTION_ERROR",
                    "The resume document could not be read".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred while processing the request".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        error_response(status, code, &message)
    }
}

/// Shared JSON error envelope: `{"error": {"code", "message"}}`.
pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }));

    (status, body).into_response()
}

/// `CatchPanicLayer` handler: a panicking handler becomes the generic 500 body.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred while processing the request",
    )
}
