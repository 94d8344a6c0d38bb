//! Client-side note state.
//!
//! [`NoteController`] holds the cached note list, the one note being edited,
//! and the generation panel. Service calls go through a [`NotesApi`]; the
//! cache only changes after a call has succeeded, so a failure always leaves
//! the previous state in place.

use tracing::{debug, warn};
use uuid::Uuid;

use lovesnotes_core::{display_title, validate_prompt, ActiveNote, Error, Note, NoteField, Result};

use crate::api::NotesApi;

/// State of the text generation side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPanel {
    pub prompt: String,
    pub generated_text: String,
    pub is_generating: bool,
}

/// Cached notes, the active note, and the generation panel for one session.
pub struct NoteController<A> {
    api: A,
    notes: Vec<Note>,
    active: ActiveNote,
    panel: GenerationPanel,
}

impl<A: NotesApi> NoteController<A> {
    /// Empty cache with a blank draft active. Call [`load`](Self::load) to fill it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            active: ActiveNote::blank(),
            panel: GenerationPanel::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active(&self) -> &ActiveNote {
        &self.active
    }

    pub fn panel(&self) -> &GenerationPanel {
        &self.panel
    }

    /// Sidebar labels, in cache order.
    pub fn titles(&self) -> Vec<&str> {
        self.notes.iter().map(|n| display_title(&n.title)).collect()
    }

    /// Replace the cache with the service's list.
    pub async fn load(&mut self) -> Result<()> {
        match self.api.list_notes().await {
            Ok(notes) => {
                debug!(subsystem = "client", op = "load", result_count = notes.len(), "Notes loaded");
                self.notes = notes;
                Ok(())
            }
            Err(e) => Err(report("load", e)),
        }
    }

    /// Start a new blank draft. Unsaved edits are dropped.
    pub fn select_draft(&mut self) {
        self.active = ActiveNote::blank();
    }

    /// Make a copy of `note` the active note.
    pub fn select_existing(&mut self, note: &Note) {
        self.active = ActiveNote::Saved(note.clone());
    }

    /// Select a cached note by id.
    pub fn select_by_id(&mut self, id: Uuid) -> Result<()> {
        let note = self
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        self.active = ActiveNote::Saved(note);
        Ok(())
    }

    /// Change one field of the active note. Nothing is sent.
    pub fn edit_field(&mut self, field: NoteField, value: impl Into<String>) {
        self.active.set(field, value);
    }

    /// Persist the active note: create a draft, update a saved note.
    ///
    /// Returns the stored note, which also becomes the active note.
    pub async fn save(&mut self) -> Result<Note> {
        let saved = match self.active.id() {
            None => {
                let note = self
                    .api
                    .create_note(&self.active.to_input())
                    .await
                    .map_err(|e| report("create", e))?;
                self.notes.push(note.clone());
                note
            }
            Some(id) => {
                let note = self
                    .api
                    .update_note(id, &self.active.to_update())
                    .await
                    .map_err(|e| report("update", e))?;
                match self.notes.iter_mut().find(|n| n.id == id) {
                    Some(cached) => *cached = note.clone(),
                    None => self.notes.push(note.clone()),
                }
                note
            }
        };

        self.active = ActiveNote::Saved(saved.clone());
        Ok(saved)
    }

    /// Delete the active note. A draft has nothing to delete.
    ///
    /// Returns the deleted id, `None` for a draft.
    pub async fn delete(&mut self) -> Result<Option<Uuid>> {
        let Some(id) = self.active.id() else {
            return Ok(None);
        };

        self.api
            .delete_note(id)
            .await
            .map_err(|e| report("delete", e))?;
        self.notes.retain(|n| n.id != id);
        self.active = ActiveNote::blank();
        Ok(Some(id))
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.panel.prompt = prompt.into();
    }

    /// Ask the service for text from the current prompt.
    ///
    /// An empty prompt fails locally without a request.
    pub async fn generate(&mut self) -> Result<&str> {
        validate_prompt(&self.panel.prompt)?;

        self.panel.generated_text.clear();
        self.panel.is_generating = true;
        let result = self.api.generate(&self.panel.prompt).await;
        self.panel.is_generating = false;

        self.panel.generated_text = result.map_err(|e| report("generate", e))?;
        Ok(&self.panel.generated_text)
    }

    /// Start a new draft whose content is the generated text.
    pub fn adopt_generated(&mut self) {
        self.active = ActiveNote::Draft {
            title: String::new(),
            content: self.panel.generated_text.clone(),
        };
    }
}

fn report(op: &'static str, err: Error) -> Error {
    warn!(subsystem = "client", op, error = %err, "Note service call failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use lovesnotes_core::{new_note_id, NoteInput, NoteUpdate, UNTITLED_NOTE};

    /// In-process service double. Fails every call while `failing` is set.
    #[derive(Clone, Default)]
    struct FakeApi {
        notes: Arc<Mutex<Vec<Note>>>,
        failing: Arc<AtomicBool>,
        generate_calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeApi {
        fn fail(&self, on: bool) {
            self.failing.store(on, Ordering::SeqCst);
        }

        fn check(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Request("connection refused".to_string()));
            }
            Ok(())
        }

        fn seed(&self, title: &str) -> Note {
            let now = Utc::now();
            let note = Note {
                id: new_note_id(),
                title: title.to_string(),
                content: String::new(),
                created_at: now,
                updated_at: now,
            };
            self.notes.lock().unwrap().push(note.clone());
            note
        }
    }

    #[async_trait]
    impl NotesApi for FakeApi {
        async fn list_notes(&self) -> Result<Vec<Note>> {
            self.check()?;
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn create_note(&self, input: &NoteInput) -> Result<Note> {
            self.check()?;
            let now = Utc::now();
            let note = Note {
                id: new_note_id(),
                title: input.title_or_default().to_string(),
                content: input.content_or_default().to_string(),
                created_at: now,
                updated_at: now,
            };
            self.notes.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: Uuid, update: &NoteUpdate) -> Result<Note> {
            self.check()?;
            let mut notes = self.notes.lock().unwrap();
            let note = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| Error::NoteNotFound("note not found".to_string()))?;
            update.apply_to(note, Utc::now());
            Ok(note.clone())
        }

        async fn delete_note(&self, id: Uuid) -> Result<()> {
            self.check()?;
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| n.id != id);
            if notes.len() == before {
                return Err(Error::NoteNotFound("note not found".to_string()));
            }
            Ok(())
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.generate_calls.lock().unwrap().push(prompt.to_string());
            self.check()?;
            Ok(format!("generated: {}", prompt))
        }
    }

    #[tokio::test]
    async fn test_load_replaces_cache() {
        let api = FakeApi::default();
        api.seed("a");
        api.seed("");
        let mut controller = NoteController::new(api.clone());

        controller.load().await.unwrap();
        assert_eq!(controller.titles(), vec!["a", UNTITLED_NOTE]);

        api.fail(true);
        assert!(controller.load().await.is_err());
        assert_eq!(controller.notes().len(), 2);
    }

    #[tokio::test]
    async fn test_save_draft_creates_and_activates() {
        let mut controller = NoteController::new(FakeApi::default());
        controller.edit_field(NoteField::Title, "Shopping");
        controller.edit_field(NoteField::Content, "milk");

        let saved = controller.save().await.unwrap();
        assert_eq!(saved.title, "Shopping");
        assert_eq!(controller.notes(), &[saved.clone()]);
        assert_eq!(controller.active(), &ActiveNote::Saved(saved));
    }

    #[tokio::test]
    async fn test_failed_create_changes_nothing() {
        let api = FakeApi::default();
        let mut controller = NoteController::new(api.clone());
        controller.edit_field(NoteField::Title, "Shopping");
        let before = controller.active().clone();

        api.fail(true);
        assert!(controller.save().await.is_err());
        assert!(controller.notes().is_empty());
        assert_eq!(controller.active(), &before);
    }

    #[tokio::test]
    async fn test_save_existing_replaces_cached_entry() {
        let api = FakeApi::default();
        let first = api.seed("first");
        let second = api.seed("second");
        let mut controller = NoteController::new(api);
        controller.load().await.unwrap();

        controller.select_existing(&first);
        controller.edit_field(NoteField::Title, "first, renamed");
        let saved = controller.save().await.unwrap();

        assert_eq!(saved.id, first.id);
        assert_eq!(controller.notes().len(), 2);
        assert_eq!(controller.notes()[0].title, "first, renamed");
        assert_eq!(controller.notes()[1], second);
        assert_eq!(controller.active().title(), "first, renamed");
    }

    #[tokio::test]
    async fn test_save_existing_missing_from_cache_is_appended() {
        let api = FakeApi::default();
        let note = api.seed("remote only");
        let mut controller = NoteController::new(api);

        controller.select_existing(&note);
        controller.edit_field(NoteField::Content, "new body");
        controller.save().await.unwrap();
        assert_eq!(controller.notes().len(), 1);
        assert_eq!(controller.notes()[0].content, "new body");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_edits_and_cache() {
        let api = FakeApi::default();
        let note = api.seed("old");
        let mut controller = NoteController::new(api.clone());
        controller.load().await.unwrap();
        controller.select_by_id(note.id).unwrap();
        controller.edit_field(NoteField::Title, "new");

        api.fail(true);
        assert!(controller.save().await.is_err());
        assert_eq!(controller.notes()[0].title, "old");
        assert_eq!(controller.active().title(), "new");
    }

    #[tokio::test]
    async fn test_delete_removes_and_resets() {
        let api = FakeApi::default();
        let note = api.seed("gone");
        let mut controller = NoteController::new(api);
        controller.load().await.unwrap();
        controller.select_existing(&note);

        assert_eq!(controller.delete().await.unwrap(), Some(note.id));
        assert!(controller.notes().is_empty());
        assert!(controller.active().is_draft());
    }

    #[tokio::test]
    async fn test_delete_draft_is_noop() {
        let api = FakeApi::default();
        api.fail(true);
        let mut controller = NoteController::new(api);
        controller.edit_field(NoteField::Title, "unsaved");
        assert_eq!(controller.delete().await.unwrap(), None);
        assert_eq!(controller.active().title(), "unsaved");
    }

    #[tokio::test]
    async fn test_failed_delete_changes_nothing() {
        let api = FakeApi::default();
        let note = api.seed("stay");
        let mut controller = NoteController::new(api.clone());
        controller.load().await.unwrap();
        controller.select_existing(&note);

        api.fail(true);
        assert!(controller.delete().await.is_err());
        assert_eq!(controller.notes().len(), 1);
        assert_eq!(controller.active().id(), Some(note.id));
    }

    #[test]
    fn test_select_draft_discards_edits() {
        let mut controller = NoteController::new(FakeApi::default());
        controller.edit_field(NoteField::Content, "scratch");
        controller.select_draft();
        assert_eq!(controller.active(), &ActiveNote::blank());
        assert!(controller.select_by_id(new_note_id()).unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt_locally() {
        let api = FakeApi::default();
        let mut controller = NoteController::new(api.clone());
        controller.set_prompt("  ");
        assert!(matches!(
            controller.generate().await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(api.generate_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_and_adopt() {
        let api = FakeApi::default();
        let mut controller = NoteController::new(api.clone());
        controller.set_prompt("a poem");
        assert_eq!(controller.generate().await.unwrap(), "generated: a poem");
        assert!(!controller.panel().is_generating);

        controller.adopt_generated();
        assert!(controller.active().is_draft());
        assert_eq!(controller.active().content(), "generated: a poem");
        assert!(api.notes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_clears_previous_text() {
        let api = FakeApi::default();
        let mut controller = NoteController::new(api.clone());
        controller.set_prompt("first");
        controller.generate().await.unwrap();

        api.fail(true);
        assert!(controller.generate().await.is_err());
        assert_eq!(controller.panel().generated_text, "");
        assert!(!controller.panel().is_generating);
    }
}
