//! Gemini-specific error handling.

use lovesnotes_core::Error;

/// Gemini error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiErrorCode {
    /// Missing or rejected API key.
    AuthenticationError,
    /// Quota or rate limit exhausted.
    QuotaExceeded,
    /// Model name not recognised.
    ModelNotFound,
    /// Request rejected as malformed.
    InvalidArgument,
    /// Provider-side failure.
    ServerError,
    /// Anything else.
    Unknown,
}

impl GeminiErrorCode {
    /// Determine error class from HTTP status and the API's status string.
    pub fn from_response(status: u16, api_status: &str) -> Self {
        match (status, api_status) {
            (401 | 403, _) | (_, "PERMISSION_DENIED" | "UNAUTHENTICATED") => {
                Self::AuthenticationError
            }
            (429, _) | (_, "RESOURCE_EXHAUSTED") => Self::QuotaExceeded,
            (404, _) | (_, "NOT_FOUND") => Self::ModelNotFound,
            (400, _) | (_, "INVALID_ARGUMENT") => Self::InvalidArgument,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a Gemini failure to a LovesNotes error.
pub fn to_lovesnotes_error(code: GeminiErrorCode, message: &str) -> Error {
    match code {
        GeminiErrorCode::AuthenticationError => {
            Error::Config(format!("Authentication failed: {}", message))
        }
        GeminiErrorCode::ModelNotFound => Error::Config(format!("Model not found: {}", message)),
        GeminiErrorCode::QuotaExceeded => {
            Error::Inference(format!("Quota exceeded: {}", message))
        }
        GeminiErrorCode::InvalidArgument => {
            Error::Inference(format!("Invalid request: {}", message))
        }
        GeminiErrorCode::ServerError => Error::Inference(format!("Server error: {}", message)),
        GeminiErrorCode::Unknown => Error::Inference(message.to_string()),
    }
}
