//! Note and reply endpoints.
//!
//! Ownership is not checked here: anyone who knows a code can delete the
//! note, and anyone who knows a client id can list that client's notes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::error::{ApiError, ApiResult};
use super::extract::{text_of, truthy, Payload};
use crate::entity::{now_millis, NewNote, Note};
use crate::error::{Result, SnowNotesError};
use crate::storage::NoteStore;

// ==================
// Shared State
// ==================

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The note store. Handlers hold the lock for the whole request.
    pub store: Arc<Mutex<NoteStore>>,
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

// ==================
// Request/Response Types
// ==================

/// Fields are loosely typed: only presence is checked, so `"public": 1` or a
/// numeric code are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateNoteRequest {
    pub code: Value,
    pub title: Value,
    pub text: Value,
    pub public: Value,
    pub owner: Value,
    pub image: Value,
}

impl CreateNoteRequest {
    /// Check that `code`, `text` and `owner` are present and truthy.
    pub fn into_new_note(self) -> Result<NewNote> {
        let code = text_of("code", &self.code)?;
        let text = text_of("text", &self.text)?;
        let owner = text_of("owner", &self.owner)?;

        let (code, text, owner) = match (code, text, owner) {
            (Some(code), Some(text), Some(owner)) => (code, text, owner),
            _ => return Err(SnowNotesError::MissingFields),
        };

        Ok(NewNote {
            code,
            title: text_of("title", &self.title)?.unwrap_or_default(),
            text,
            // absent or null means public
            public: self.public.is_null() || truthy(&self.public),
            owner,
            image: text_of("image", &self.image)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddReplyRequest {
    pub text: Value,
}

#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    pub success: bool,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct AddReplyResponse {
    pub success: bool,
    pub time: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub success: bool,
}

// ==================
// Routes
// ==================

/// The owner listing's static `owner` segment shadows
/// `/notes/{code}/replies` for a note coded `owner`, so POSTs to
/// `/notes/owner/replies` are routed to the reply handler by hand.
const OWNER_SEGMENT: &str = "owner";
const REPLIES_SEGMENT: &str = "replies";

pub fn note_routes(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(list_public_notes).post(create_note))
        .route("/notes/admin/all", get(list_all_notes))
        .route(
            "/notes/owner/{client_id}",
            get(list_owner_notes).post(add_reply_to_owner_note),
        )
        .route("/notes/{code}", get(get_note).delete(delete_note))
        .route("/notes/{code}/replies", post(add_reply))
        .with_state(state)
}

/// Fill in the replies of every note.
fn with_replies(store: &NoteStore, mut notes: Vec<Note>) -> Result<Vec<Note>> {
    for note in &mut notes {
        note.replies = store.get_replies(&note.code)?;
    }
    Ok(notes)
}

/// GET /notes/admin/all - every note, private ones included
async fn list_all_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<Note>>> {
    let store = state.store.lock().await;
    let notes = store.get_all_notes_admin()?;
    Ok(Json(with_replies(&store, notes)?))
}

/// GET /notes - public notes
async fn list_public_notes(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Note>>> {
    let store = state.store.lock().await;
    let notes = store.get_all_notes()?;
    Ok(Json(with_replies(&store, notes)?))
}

/// GET /notes/{code}
async fn get_note(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Note>> {
    let store = state.store.lock().await;
    let mut note = store
        .get_note(&code)?
        .ok_or(SnowNotesError::NoteNotFound(code))?;
    note.replies = store.get_replies(&note.code)?;
    Ok(Json(note))
}

/// GET /notes/owner/{client_id}
async fn list_owner_notes(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<Note>>> {
    let store = state.store.lock().await;
    let notes = store.get_notes_by_owner(&client_id)?;
    Ok(Json(with_replies(&store, notes)?))
}

/// POST /notes
async fn create_note(
    State(state): State<AppState>,
    Payload(request): Payload<CreateNoteRequest>,
) -> ApiResult<Json<CreateNoteResponse>> {
    let note = request.into_new_note()?;

    let now = now_millis();
    let store = state.store.lock().await;
    store.insert_note(&note, now, now)?;

    tracing::info!(code = %note.code, public = note.public, "note created");

    Ok(Json(CreateNoteResponse {
        success: true,
        code: note.code,
    }))
}

/// POST /notes/{code}/replies
async fn add_reply(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Payload(request): Payload<AddReplyRequest>,
) -> ApiResult<Json<AddReplyResponse>> {
    append_reply(&state, code, request).await
}

/// POST /notes/owner/{client_id} - only `/notes/owner/replies` exists
async fn add_reply_to_owner_note(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Payload(request): Payload<AddReplyRequest>,
) -> ApiResult<Json<AddReplyResponse>> {
    if client_id != REPLIES_SEGMENT {
        return Err(ApiError::Status(StatusCode::METHOD_NOT_ALLOWED));
    }
    append_reply(&state, OWNER_SEGMENT.to_string(), request).await
}

async fn append_reply(
    state: &AppState,
    code: String,
    request: AddReplyRequest,
) -> ApiResult<Json<AddReplyResponse>> {
    let text = text_of("text", &request.text)?.ok_or(SnowNotesError::MissingReplyText)?;

    let store = state.store.lock().await;
    if store.get_note(&code)?.is_none() {
        return Err(SnowNotesError::NoteNotFound(code).into());
    }

    let now = now_millis();
    store.insert_reply(&code, &text, now)?;

    Ok(Json(AddReplyResponse {
        success: true,
        time: now,
    }))
}

/// DELETE /notes/{code}
async fn delete_note(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<DeleteNoteResponse>> {
    let store = state.store.lock().await;
    if store.get_note(&code)?.is_none() {
        return Err(SnowNotesError::NoteNotFound(code).into());
    }

    store.delete_note_with_replies(&code)?;
    tracing::info!(code = %code, "note deleted");

    Ok(Json(DeleteNoteResponse { success: true }))
}
