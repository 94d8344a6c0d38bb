//! HTTP error responses.
//!
//! Every failure is rendered as `{"message": "..."}`. Which status a core
//! error maps to depends on the operation, so handlers pick one of the
//! `for_*` constructors instead of a blanket `From` impl.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use lovesnotes_core::Error;

/// Message returned when a create or update names no note.
pub const NOTE_NOT_FOUND: &str = "note not found";

/// Message returned when a delete names no note.
pub const DELETE_NOTE_NOT_FOUND: &str = "Note not found";

/// Message returned for any generation failure other than an empty prompt.
pub const GENERATION_FAILED: &str = "Failed to generate text";

/// Body of every error response, and of the delete confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    BadRequest(String),
    Internal(String),
    GenerationFailed,
}

impl ApiError {
    /// Create and update: anything but a missing note is the caller's 400.
    pub fn for_write(err: Error) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound(NOTE_NOT_FOUND);
        }
        if err.is_storage() {
            warn!(subsystem = "api", error = %err, "Note write failed");
        }
        ApiError::BadRequest(err.to_string())
    }

    /// List and delete: store failures are the server's 500.
    pub fn for_read(err: Error) -> Self {
        match err {
            Error::NoteNotFound(_) => ApiError::NotFound(DELETE_NOTE_NOT_FOUND),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!(subsystem = "api", error = %other, "Note store failed");
                ApiError::Internal(other.to_string())
            }
        }
    }

    /// Generation: the provider detail is logged, never returned.
    pub fn for_generation(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!(subsystem = "api", component = "generate", error = %other, "Generation failed");
                ApiError::GenerationFailed
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::GenerationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERATION_FAILED.to_string(),
            ),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_write_errors() {
        assert_eq!(
            status_of(ApiError::for_write(Error::NoteNotFound("x".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::for_write(Error::Storage("down".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::for_write(Error::InvalidInput("nul".into()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message_depends_on_operation() {
        assert!(matches!(
            ApiError::for_write(Error::NoteNotFound("x".into())),
            ApiError::NotFound("note not found")
        ));
        assert!(matches!(
            ApiError::for_read(Error::NoteNotFound("x".into())),
            ApiError::NotFound("Note not found")
        ));
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(
            status_of(ApiError::for_read(Error::NoteNotFound("x".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::for_read(Error::Storage("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::for_read(Error::InvalidInput("bad".into()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_generation_errors_hide_detail() {
        assert!(matches!(
            ApiError::for_generation(Error::Inference("quota for key abc".into())),
            ApiError::GenerationFailed
        ));
        assert!(matches!(
            ApiError::for_generation(Error::Config("GEMINI_API_KEY is not set".into())),
            ApiError::GenerationFailed
        ));
        assert!(matches!(
            ApiError::for_generation(Error::InvalidInput("prompt is required".into())),
            ApiError::BadRequest(ref m) if m == "prompt is required"
        ));
    }
}
