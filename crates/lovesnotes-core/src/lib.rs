//! # lovesnotes-core
//!
//! Core types, traits, and abstractions for LovesNotes.
//!
//! This crate provides the note data model, the shared error type, and the
//! storage and generation traits that the database, inference, API, and
//! client crates depend on.
//!
//! ## Logging conventions
//!
//! Every crate logs through `tracing` with the same structured field names,
//! so one query works across server, store and client:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `request_id` | UUIDv7 from the `x-request-id` header |
//! | `subsystem` | `api`, `db`, `inference`, `client` |
//! | `component` | e.g. `pool`, `notes`, `memory`, `gemini` |
//! | `op` | `create`, `list`, `update`, `delete`, `generate` |
//! | `note_id` | note being operated on |
//! | `duration_ms`, `result_count`, `prompt_len`, `response_len` | measurements |
//! | `model` | generation model |
//! | `error` | failure detail |
//!
//! Levels: ERROR for degraded service, WARN for a failed operation reported
//! to the caller, INFO for lifecycle events and mutations, DEBUG for
//! decision points.

pub mod error;
pub mod ids;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use ids::{is_v7, new_note_id, parse_note_id};
pub use models::*;
pub use traits::*;
