use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extract::ExtractionError;
use crate::auth::AuthError;
use crate::llm_client::{LlmError, MODEL};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Please log in to continue".to_string(),
            ),
            AppError::Extraction(ExtractionError::InsufficientText { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_TEXT",
                "Could not extract text from PDF. This may be a scanned/image-based resume. \
                 Please upload a text-based PDF."
                    .to_string(),
            ),
            AppError::Extraction(e @ ExtractionError::Failed(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED", e.to_string())
            }
            AppError::Llm(e) => llm_parts(e),
            AppError::Auth(e) => auth_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

fn llm_parts(e: &LlmError) -> (StatusCode, &'static str, String) {
    match e {
        LlmError::QuotaExceeded { message } => {
            tracing::warn!("Gemini quota exceeded: {message}");
            (
                StatusCode::TOO_MANY_REQUESTS,
                "QUOTA_EXCEEDED",
                "API quota exceeded. Please try again later or add billing to your Google Cloud project."
                    .to_string(),
            )
        }
        LlmError::InvalidCredential { message } => {
            tracing::error!("Gemini rejected the request: {message}");
            (
                StatusCode::BAD_GATEWAY,
                "INVALID_CREDENTIAL",
                "Invalid API key. Please check your .env file and ensure the key is valid."
                    .to_string(),
            )
        }
        LlmError::ModelUnavailable { model, message } => {
            tracing::error!("Gemini model {model} unavailable: {message}");
            (
                StatusCode::BAD_GATEWAY,
                "MODEL_UNAVAILABLE",
                format!("Model not found. The {MODEL} model may not be available."),
            )
        }
        LlmError::Unknown { message } => {
            tracing::error!("Gemini API error: {message}");
            (
                StatusCode::BAD_GATEWAY,
                "UNKNOWN_API_ERROR",
                format!("API Error: {message}"),
            )
        }
        LlmError::Parse(err) => {
            tracing::error!("Could not parse model output: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_PARSE_ERROR",
                "The AI returned an unexpected response. Please try again.".to_string(),
            )
        }
        LlmError::EmptyContent => (
            StatusCode::BAD_GATEWAY,
            "LLM_EMPTY_RESPONSE",
            "The AI returned an empty response. Please try again.".to_string(),
        ),
    }
}

fn auth_parts(e: &AuthError) -> (StatusCode, &'static str, String) {
    match e {
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND", e.to_string()),
        AuthError::IncorrectPassword => {
            (StatusCode::UNAUTHORIZED, "INCORRECT_PASSWORD", e.to_string())
        }
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        AuthError::UsernameTaken => (StatusCode::CONFLICT, "USERNAME_TAKEN", e.to_string()),
        AuthError::Persistence { .. } | AuthError::Malformed { .. } | AuthError::Hashing(_) => {
            tracing::error!("Credential store error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                "Failed to save user. Please try again.".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
