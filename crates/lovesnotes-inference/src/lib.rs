//! # lovesnotes-inference
//!
//! Text generation backends for LovesNotes.
//!
//! This crate provides:
//! - [`GeminiBackend`], a client for Google's Gemini `generateContent` API
//! - [`mock::MockGenerationBackend`] (feature `mock`) for deterministic tests
//!
//! # Example
//!
//! ```rust,no_run
//! use lovesnotes_inference::GeminiBackend;
//! use lovesnotes_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let text = backend.generate("Write a shopping list").await.unwrap();
//!     println!("{}", text);
//! }
//! ```

pub mod gemini;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use lovesnotes_core::*;

pub use gemini::{GeminiBackend, GeminiConfig, GeminiErrorCode};
