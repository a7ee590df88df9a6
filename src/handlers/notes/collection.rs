use axum::{
    extract::{OriginalUri, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use super::FolderRef;
use crate::api::format::NoteResponse;
use crate::app::AppState;
use crate::database::models::NewNote;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{resource_location, ApiResponse, JsonBody};
use crate::validation::note_validation_error;

#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub name: Option<String>,
    #[serde(rename = "folderId", alias = "folderid", alias = "folder_id")]
    pub folder_id: Option<FolderRef>,
    pub content: Option<String>,
}

/// GET /notes - All notes in storage order
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = state.store.list_notes().await?;
    Ok(Json(notes.iter().map(NoteResponse::from).collect()))
}

/// POST /notes - Create a note from `{name, folderId, content}`
pub async fn post(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody<CreateNote>,
) -> ApiResult<ApiResponse<NoteResponse>> {
    let name = body.name.ok_or_else(|| ApiError::missing_field("name"))?;
    let folder_id = body.folder_id.ok_or_else(|| ApiError::missing_field("folderId"))?;
    let content = body.content.ok_or_else(|| ApiError::missing_field("content"))?;

    if let Some(message) = note_validation_error(Some(&name), Some(&content)) {
        return Err(ApiError::bad_request(message));
    }

    let new_note = NewNote {
        name,
        folder_id: folder_id.to_id()?,
        content,
    };
    let note = state.store.insert_note(new_note).await?;
    info!("Note with id {} created", note.id);

    let location = resource_location(uri.path(), note.id);
    Ok(ApiResponse::created(NoteResponse::from(note), location))
}
