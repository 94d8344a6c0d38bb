//! Note CRUD handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use uuid::Uuid;

use lovesnotes_core::{parse_note_id, Note, NoteInput, NoteUpdate};

use crate::error::{ApiError, MessageResponse, DELETE_NOTE_NOT_FOUND, NOTE_NOT_FOUND};
use crate::AppState;

/// Path ids that are not UUIDs cannot name a note.
fn note_id(raw: &str, not_found: &'static str) -> Result<Uuid, ApiError> {
    parse_note_id(raw).ok_or(ApiError::NotFound(not_found))
}

/// Create a note.
///
/// POST /notes
#[utoipa::path(post, path = "/notes", tag = "Notes",
    request_body = NoteInput,
    responses(
        (status = 201, description = "Created", body = Note),
        (status = 400, description = "Invalid body or store failure", body = MessageResponse)
    ))]
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(input) = body?;
    let note = state
        .notes
        .create(input)
        .await
        .map_err(ApiError::for_write)?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// List every note in insertion order.
///
/// GET /notes
#[utoipa::path(get, path = "/notes", tag = "Notes",
    responses(
        (status = 200, description = "All notes", body = [Note]),
        (status = 500, description = "Store failure", body = MessageResponse)
    ))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await.map_err(ApiError::for_read)?;
    debug!(subsystem = "api", op = "list", result_count = notes.len(), "Listed notes");
    Ok(Json(notes))
}

/// Replace a note's title and content.
///
/// PUT /notes/{id}
#[utoipa::path(put, path = "/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    request_body = NoteUpdate,
    responses(
        (status = 200, description = "Updated", body = Note),
        (status = 404, description = "No such note", body = MessageResponse),
        (status = 400, description = "Invalid body or store failure", body = MessageResponse)
    ))]
pub async fn update_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<NoteUpdate>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(&raw_id, NOTE_NOT_FOUND)?;
    let Json(update) = body?;
    let note = state
        .notes
        .update(id, update)
        .await
        .map_err(ApiError::for_write)?;
    Ok(Json(note))
}

/// Permanently delete a note.
///
/// DELETE /notes/{id}
#[utoipa::path(delete, path = "/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "No such note", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ))]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = note_id(&raw_id, DELETE_NOTE_NOT_FOUND)?;
    state.notes.delete(id).await.map_err(ApiError::for_read)?;
    Ok(Json(MessageResponse::new("Note deleted successfully")))
}
