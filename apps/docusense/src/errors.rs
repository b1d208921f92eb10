use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::SubmitError;

const BACKEND_HINT: &str =
    "Make sure the analysis backend is running and reachable at the configured DOCUSENSE_BACKEND_URL.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// User input problem caught before any backend call (e.g. no file chosen).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload larger than the configured cap.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A derived action ran without its prerequisite (e.g. no resume analyzed yet).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Superseded by a newer submission")]
    Superseded,

    /// Transport or application failure reported by the analysis backend.
    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::MissingFile(message) => AppError::Validation(message.to_string()),
            SubmitError::Analysis { message } => AppError::Analysis(message),
            SubmitError::Superseded => AppError::Superseded,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Precondition(msg) => {
                (StatusCode::CONFLICT, "PRECONDITION_FAILED", msg.clone())
            }
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "SUPERSEDED",
                "A newer submission replaced this one".to_string(),
            ),
            AppError::Analysis(msg) => (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if matches!(self, AppError::Analysis(_)) {
            error["hint"] = json!(BACKEND_HINT);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
