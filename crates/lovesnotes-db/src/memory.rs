//! In-memory note repository.
//!
//! Backs the server when `NOTES_STORE=memory` and stands in for PostgreSQL in
//! tests. Clones share the same underlying notes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use lovesnotes_core::{
    new_note_id, truncate_to_micros, Error, Note, NoteInput, NoteRepository, NoteUpdate, Result,
};

/// Vec-backed implementation of NoteRepository, kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<Vec<Note>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable store: every call fails with `Error::Storage`
    /// while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Storage("note store is unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, input: NoteInput) -> Result<Note> {
        self.check_available()?;
        input.validate()?;

        let now = truncate_to_micros(Utc::now());
        let note = Note {
            id: new_note_id(),
            title: input.title_or_default().to_string(),
            content: input.content_or_default().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.push(note.clone());

        info!(
            subsystem = "db",
            component = "memory",
            op = "create",
            note_id = %note.id,
            "Note created"
        );
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        self.check_available()?;
        let notes = self.notes.read().await.clone();
        debug!(
            subsystem = "db",
            component = "memory",
            op = "list",
            result_count = notes.len(),
            "Notes listed"
        );
        Ok(notes)
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Note> {
        self.check_available()?;
        update.validate()?;

        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        update.apply_to(note, truncate_to_micros(Utc::now()));

        info!(
            subsystem = "db",
            component = "memory",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.check_available()?;

        let mut notes = self.notes.write().await;
        let position = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        notes.remove(position);

        info!(
            subsystem = "db",
            component = "memory",
            op = "delete",
            note_id = %id,
            "Note deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lovesnotes_core::is_v7;
    use std::collections::HashSet;

    fn ids(notes: &[Note]) -> HashSet<Uuid> {
        notes.iter().map(|n| n.id).collect()
    }

    #[tokio::test]
    async fn test_create_then_list_contains_note() {
        let repo = InMemoryNoteRepository::new();
        let note = repo
            .create(NoteInput::new("Shopping", "milk"))
            .await
            .unwrap();

        assert!(is_v7(&note.id));
        assert_eq!(note.created_at, note.updated_at);

        let notes = repo.list().await.unwrap();
        let matching: Vec<_> = notes
            .iter()
            .filter(|n| n.title == "Shopping" && n.content == "milk")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, note.id);
    }

    #[tokio::test]
    async fn test_create_applies_empty_defaults() {
        let repo = InMemoryNoteRepository::new();
        let note = repo.create(NoteInput::default()).await.unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
        assert_eq!(note.display_title(), "Untitled Note");
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryNoteRepository::new();
        let a = repo.create(NoteInput::new("a", "")).await.unwrap();
        let b = repo.create(NoteInput::new("b", "")).await.unwrap();
        let c = repo.create(NoteInput::new("c", "")).await.unwrap();

        let listed: Vec<Uuid> = repo.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(listed, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let repo = InMemoryNoteRepository::new();
        let note = repo
            .create(NoteInput::new("Shopping", "milk"))
            .await
            .unwrap();

        let updated = repo
            .update(note.id, NoteUpdate::new("Shopping list", "milk, eggs"))
            .await
            .unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title, "Shopping list");
        assert_eq!(updated.content, "milk, eggs");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);

        let again = repo
            .update(note.id, NoteUpdate::new("Shopping list", "milk, eggs"))
            .await
            .unwrap();
        assert!(again.updated_at > updated.updated_at);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![again]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_store_unchanged() {
        let repo = InMemoryNoteRepository::new();
        repo.create(NoteInput::new("keep", "me")).await.unwrap();
        let before = repo.list().await.unwrap();

        let err = repo
            .update(new_note_id(), NoteUpdate::new("a", "b"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = repo.delete(new_note_id()).await.unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(ids(&before), ids(&repo.list().await.unwrap()));
    }

    #[tokio::test]
    async fn test_delete_removes_note() {
        let repo = InMemoryNoteRepository::new();
        let keep = repo.create(NoteInput::new("keep", "")).await.unwrap();
        let gone = repo.create(NoteInput::new("gone", "")).await.unwrap();

        repo.delete(gone.id).await.unwrap();
        let listed = repo.list().await.unwrap();
        assert!(listed.iter().all(|n| n.id != gone.id));
        assert!(listed.iter().any(|n| n.id == keep.id));

        let err = repo.delete(gone.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let repo = InMemoryNoteRepository::new();
        repo.create(NoteInput::new("one", "1")).await.unwrap();
        repo.create(NoteInput::new("two", "2")).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), repo.list().await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let repo = InMemoryNoteRepository::new();
        let err = repo
            .create(NoteInput::new("nul\0", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let repo = InMemoryNoteRepository::new();
        let note = repo.create(NoteInput::new("x", "y")).await.unwrap();

        repo.set_unavailable(true);
        assert!(repo.list().await.unwrap_err().is_storage());
        assert!(repo
            .create(NoteInput::default())
            .await
            .unwrap_err()
            .is_storage());
        assert!(repo
            .update(note.id, NoteUpdate::default())
            .await
            .unwrap_err()
            .is_storage());
        assert!(repo.delete(note.id).await.unwrap_err().is_storage());

        repo.set_unavailable(false);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryNoteRepository::new();
        let other = repo.clone();
        repo.create(NoteInput::new("shared", "")).await.unwrap();
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
