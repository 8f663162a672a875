use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is recovered at the HTTP boundary; none ends the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("NLP model not loaded")]
    ModelUnavailable,

    #[error("Please enter a job description.")]
    EmptyJobDescription,

    #[error("Job description is too short.")]
    NoJobTokens,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Extraction(ExtractionError::Failed { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILURE")
            }
            AppError::Extraction(ExtractionError::NoText) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_EXTRACTABLE_TEXT")
            }
            AppError::ModelUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE"),
            AppError::EmptyJobDescription => (StatusCode::BAD_REQUEST, "EMPTY_JOB_DESCRIPTION"),
            AppError::NoJobTokens => (StatusCode::UNPROCESSABLE_ENTITY, "NO_JOB_TOKENS"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

/// Body-limit failures keep their 413; every other rejection is a bad request.
fn rejection_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        rejection_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        rejection_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        rejection_error(err.status(), format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Validation(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                e.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failure_is_unprocessable() {
        let err = AppError::from(ExtractionError::Failed {
            direct: "bad xref".to_string(),
            fallback: "no trailer".to_string(),
        });
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "EXTRACTION_FAILURE");
        assert_eq!(err.to_string(), "Error reading PDF: bad xref | no trailer");
    }

    #[test]
    fn test_empty_and_no_tokens_are_distinct() {
        let (empty_status, empty_code) = AppError::EmptyJobDescription.status_and_code();
        let (short_status, short_code) = AppError::NoJobTokens.status_and_code();
        assert_eq!(empty_status, StatusCode::BAD_REQUEST);
        assert_eq!(short_status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_ne!(empty_code, short_code);
    }

    #[test]
    fn test_model_unavailable_is_503() {
        let (status, code) = AppError::ModelUnavailable.status_and_code();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "MODEL_UNAVAILABLE");
    }

    #[test]
    fn test_rejection_status_selects_variant() {
        let too_large = rejection_error(StatusCode::PAYLOAD_TOO_LARGE, "limit".to_string());
        assert_eq!(too_large.status_and_code().1, "PAYLOAD_TOO_LARGE");

        let malformed = rejection_error(StatusCode::UNPROCESSABLE_ENTITY, "bad".to_string());
        assert_eq!(malformed.status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /tmp/x")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
