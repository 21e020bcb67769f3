use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Space {0} not found")]
    SpaceNotFound(Uuid),

    #[error("Round '{0}' not found")]
    RoundNotFound(String),

    #[error("Question {0} not found")]
    QuestionNotFound(Uuid),

    #[error("Question {0} has no answer to follow up on")]
    AnswerMissing(Uuid),

    #[error("Round '{0}' is already completed")]
    RoundAlreadyCompleted(String),

    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("Resume extraction failed: {0}")]
    Extraction(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Partial write: {written} of {total} answers recorded")]
    PartialWrite { written: usize, total: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SpaceNotFound(_) => {
                (StatusCode::NOT_FOUND, "SPACE_NOT_FOUND", self.to_string())
            }
            AppError::RoundNotFound(_) => {
                (StatusCode::NOT_FOUND, "ROUND_NOT_FOUND", self.to_string())
            }
            AppError::QuestionNotFound(_) => {
                (StatusCode::NOT_FOUND, "QUESTION_NOT_FOUND", self.to_string())
            }
            AppError::AnswerMissing(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ANSWER_MISSING",
                self.to_string(),
            ),
            AppError::RoundAlreadyCompleted(_) => (
                StatusCode::BAD_REQUEST,
                "ROUND_ALREADY_COMPLETED",
                self.to_string(),
            ),
            AppError::UnsupportedFormat(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::PartialWrite { written, total } => {
                tracing::error!("Partial write: {written}/{total} answers recorded");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARTIAL_WRITE",
                    self.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
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

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
