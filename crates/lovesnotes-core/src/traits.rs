//! Core traits for LovesNotes abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Note, NoteInput, NoteUpdate};

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Storage for notes.
///
/// Each call is one atomic operation against the store. There are no
/// cross-call transactions and no concurrency tokens: two writers updating
/// the same note race, and the last write wins.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, assigning its id and both timestamps.
    async fn create(&self, input: NoteInput) -> Result<Note>;

    /// All notes in insertion order.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Replace title/content of a note and refresh `updated_at`.
    ///
    /// Returns `Error::NoteNotFound` if no note has that id.
    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Note>;

    /// Permanently remove a note.
    ///
    /// Returns `Error::NoteNotFound` if no note has that id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// GENERATION TRAITS
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a non-empty prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
