//! Note data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Label shown for a note whose title is empty.
pub const UNTITLED_NOTE: &str = "Untitled Note";

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A persisted note, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Title for display, falling back to [`UNTITLED_NOTE`].
    pub fn display_title(&self) -> &str {
        display_title(&self.title)
    }
}

/// Display form of a title.
pub fn display_title(title: &str) -> &str {
    if title.is_empty() {
        UNTITLED_NOTE
    } else {
        title
    }
}

/// Body of a create request. Missing fields default to empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Check the fields against what the store can hold.
    pub fn validate(&self) -> Result<()> {
        validate_field("title", self.title.as_deref())?;
        validate_field("content", self.content.as_deref())
    }

    /// Title with the empty default applied.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Content with the empty default applied.
    pub fn content_or_default(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Body of an update request.
///
/// A field left out keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_field("title", self.title.as_deref())?;
        validate_field("content", self.content.as_deref())
    }

    /// Apply this update to a stored note, stamping `updated_at`.
    pub fn apply_to(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        note.updated_at = next_updated_at(note.updated_at, now);
    }
}

fn validate_field(name: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.contains('\0') => Err(Error::InvalidInput(format!(
            "{} must not contain NUL characters",
            name
        ))),
        _ => Ok(()),
    }
}

/// Timestamp for an update: `now`, pushed past `previous` when the clock has
/// not advanced, so every update strictly increases `updated_at`.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    if now < floor {
        floor
    } else {
        now
    }
}

/// Round a timestamp to the microsecond precision PostgreSQL stores.
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let micros = ts.timestamp_micros();
    DateTime::from_timestamp_micros(micros).unwrap_or(ts)
}

// =============================================================================
// CLIENT-SIDE EDITING
// =============================================================================

/// The note currently open in the editor.
///
/// A draft has never been saved and therefore has no id; it must never be
/// sent to update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveNote {
    Draft { title: String, content: String },
    Saved(Note),
}

impl Default for ActiveNote {
    fn default() -> Self {
        Self::blank()
    }
}

impl ActiveNote {
    /// A fresh blank draft.
    pub fn blank() -> Self {
        Self::Draft {
            title: String::new(),
            content: String::new(),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            Self::Draft { .. } => None,
            Self::Saved(note) => Some(note.id),
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft { .. })
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Draft { title, .. } => title,
            Self::Saved(note) => &note.title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Draft { content, .. } => content,
            Self::Saved(note) => &note.content,
        }
    }

    pub fn display_title(&self) -> &str {
        display_title(self.title())
    }

    /// Set one field. Only the active copy changes.
    pub fn set(&mut self, field: NoteField, value: impl Into<String>) {
        let value = value.into();
        let slot = match (self, field) {
            (Self::Draft { title, .. }, NoteField::Title) => title,
            (Self::Draft { content, .. }, NoteField::Content) => content,
            (Self::Saved(note), NoteField::Title) => &mut note.title,
            (Self::Saved(note), NoteField::Content) => &mut note.content,
        };
        *slot = value;
    }

    /// Create body for a draft.
    pub fn to_input(&self) -> NoteInput {
        NoteInput::new(self.title(), self.content())
    }

    /// Update body carrying both fields.
    pub fn to_update(&self) -> NoteUpdate {
        NoteUpdate::new(self.title(), self.content())
    }
}

/// Editable fields of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    Title,
    Content,
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Content => f.write_str("content"),
        }
    }
}

impl FromStr for NoteField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other => Err(Error::InvalidInput(format!(
                "unknown note field '{}', expected 'title' or 'content'",
                other
            ))),
        }
    }
}

// =============================================================================
// GENERATION TYPES
// =============================================================================

/// Body of a text generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Reply to a successful text generation request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub generated_text: String,
}

/// Reject a prompt that is empty after trimming.
pub fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(Error::InvalidInput("prompt is required".to_string()));
    }
    Ok(())
}
