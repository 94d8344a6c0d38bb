//! # lovesnotes-client
//!
//! Client side of LovesNotes: a [`NoteController`] that keeps a session's
//! note list, active note and generation panel in step with the service, and
//! the [`HttpNotesApi`] it talks through.
//!
//! ```rust,ignore
//! use lovesnotes_client::{HttpNotesApi, NoteController};
//! use lovesnotes_core::NoteField;
//!
//! let mut controller = NoteController::new(HttpNotesApi::from_env()?);
//! controller.load().await?;
//! controller.edit_field(NoteField::Title, "Shopping");
//! controller.edit_field(NoteField::Content, "milk");
//! let note = controller.save().await?;
//! ```

pub mod api;
pub mod config;
pub mod controller;

// Re-export core types
pub use lovesnotes_core::*;

pub use api::{HttpNotesApi, NotesApi};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use controller::{GenerationPanel, NoteController};
