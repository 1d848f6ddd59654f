use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Whether error responses may carry the underlying error detail.
/// Set once at startup from the `ENVIRONMENT` configuration.
static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

pub fn set_expose_error_details(expose: bool) {
    EXPOSE_ERROR_DETAILS.set(expose).ok();
}

fn expose_error_details() -> bool {
    *EXPOSE_ERROR_DETAILS.get().unwrap_or(&false)
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every failure renders as the shared `{ success: false, error }` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model output error: {0}")]
    ModelOutput(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                // LlmError display strings are already caller-friendly.
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
            }
            AppError::ModelOutput(msg) => {
                tracing::error!("Unusable model output: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::Document(msg) => {
                tracing::error!("Document generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate the document".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    Some(format!("{e:?}")),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": message,
        });
        if expose_error_details() {
            if let Some(detail) = detail {
                body["details"] = json!(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}
