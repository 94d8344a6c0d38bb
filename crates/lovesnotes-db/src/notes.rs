//! PostgreSQL note repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};
use uuid::Uuid;

use lovesnotes_core::{new_note_id, Error, Note, NoteInput, NoteRepository, NoteUpdate, Result};

const NOTE_COLUMNS: &str = "id, title, content, created_at_utc, updated_at_utc";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at_utc"),
        updated_at: row.get("updated_at_utc"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, input: NoteInput) -> Result<Note> {
        input.validate()?;

        let query = format!(
            "INSERT INTO note (id, title, content, created_at_utc, updated_at_utc) \
             VALUES ($1, $2, $3, now(), now()) \
             RETURNING {NOTE_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(new_note_id())
            .bind(input.title_or_default())
            .bind(input.content_or_default())
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        let note = map_row_to_note(row);
        info!(
            subsystem = "db",
            component = "notes",
            op = "create",
            note_id = %note.id,
            "Note created"
        );
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM note ORDER BY created_at_utc ASC, id ASC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes: Vec<Note> = rows.into_iter().map(map_row_to_note).collect();
        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            "Notes listed"
        );
        Ok(notes)
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Note> {
        update.validate()?;

        // GREATEST keeps updated_at strictly increasing even if two updates
        // land within one clock tick.
        let query = format!(
            "UPDATE note SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 updated_at_utc = GREATEST(clock_timestamp(), updated_at_utc + interval '1 microsecond') \
             WHERE id = $1 \
             RETURNING {NOTE_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.content.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(map_row_to_note(row))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id.to_string()));
        }

        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            "Note deleted"
        );
        Ok(())
    }
}
