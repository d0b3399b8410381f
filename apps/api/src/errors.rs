use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::ai::AiError;
use crate::applications::store::StoreError;
use crate::applications::validation::ValidationErrors;
use crate::dashboard::commands::CommandError;
use crate::dashboard::import::ImportError;
use crate::dashboard::notices::Notice;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("AI did not return expected result: {0}")]
    AiShape(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    /// A failed mutation, carrying the notice the client should show.
    #[error("{error}")]
    WithNotice { error: Box<AppError>, notice: Notice },
}

impl AppError {
    pub fn with_notice(self, notice: Notice) -> Self {
        AppError::WithNotice {
            error: Box::new(self),
            notice,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Job application {id} not found")),
            StoreError::InvalidRow(errors) => {
                AppError::Internal(anyhow::anyhow!("stored row failed validation: {errors}"))
            }
            other => AppError::Store(other),
        }
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::InvalidInput(errors) => AppError::Validation(errors),
            AiError::Model(e) => AppError::Llm(e.to_string()),
            AiError::UnexpectedShape(detail) => AppError::AiShape(detail),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Import(e) => e.into(),
            CommandError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        let (status, code, message) = match self {
            AppError::WithNotice { error, notice } => {
                let (status, mut body) = error.status_and_body();
                body["notice"] = serde_json::to_value(notice).unwrap_or(Value::Null);
                return (status, body);
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(errors) => {
                let body = json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": errors.to_string(),
                        "fields": errors.fields(),
                    }
                });
                return (StatusCode::BAD_REQUEST, body);
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OPERATION_FAILED",
                    "The operation failed. Please try again.".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::AiShape(detail) => {
                tracing::error!("Unexpected AI output: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_UNEXPECTED_RESULT",
                    "AI did not return expected result.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });

        (status, body)
    }
}
