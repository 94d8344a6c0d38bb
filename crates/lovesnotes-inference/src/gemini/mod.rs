//! Google Gemini generation backend.
//!
//! Calls `POST {base_url}/models/{model}:generateContent` with the API key in
//! the `x-goog-api-key` header.
//!
//! # Example
//!
//! ```rust,no_run
//! use lovesnotes_inference::gemini::{GeminiBackend, GeminiConfig};
//!
//! let backend = GeminiBackend::new(GeminiConfig {
//!     api_key: Some("my-key".to_string()),
//!     ..Default::default()
//! })
//! .unwrap();
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    GeminiBackend, GeminiConfig, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::{to_lovesnotes_error, GeminiErrorCode};
pub use types::*;
