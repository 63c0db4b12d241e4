use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::keywords::queue::QueueError;
use crate::keywords::source::SheetError;
use crate::llm_client::LlmError;
use crate::research::dispatcher::DispatchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is local to the request that raised it: the session and its
/// other tool state survive.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Error reading Google Sheet: {0}")]
    Sheet(#[from] SheetError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Queue(e) => {
                tracing::error!("Selection queue contract violation: {e}");
                (StatusCode::BAD_REQUEST, "QUEUE_INDEX_OUT_OF_RANGE")
            }
            AppError::Sheet(e) => {
                tracing::error!("Sheet error: {e}");
                (StatusCode::BAD_GATEWAY, "SHEET_SOURCE_ERROR")
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR")
            }
            AppError::Dispatch(e) => {
                tracing::error!("Dispatch error: {e}");
                (StatusCode::BAD_GATEWAY, "WORKFLOW_ERROR")
            }
        };

        (status, error_body(code, &self.to_string())).into_response()
    }
}

fn error_body(code: &str, message: &str) -> Json<serde_json::Value> {
    Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }))
}
