use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Deserialize;

use super::FolderRef;
use crate::api::format::NoteResponse;
use crate::app::AppState;
use crate::database::models::{Note, NotePatch};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiResponse, JsonBody};

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNote {
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "folderId", alias = "folderid", alias = "folder_id")]
    pub folder_id: Option<FolderRef>,
}

impl UpdateNote {
    /// Drops falsy fields; `modified` and unknown keys are never written.
    fn into_patch(self) -> Result<NotePatch, ApiError> {
        let folder_id = match self.folder_id.filter(|f| !f.is_blank()) {
            Some(folder) => Some(folder.to_id()?),
            None => None,
        };
        Ok(NotePatch {
            name: self.name.filter(|name| !name.is_empty()),
            content: self.content.filter(|content| !content.is_empty()),
            folder_id,
        })
    }
}

/// GET /notes/:note_id
pub async fn get(Extension(note): Extension<Note>) -> Json<NoteResponse> {
    Json(NoteResponse::from(note))
}

/// DELETE /notes/:note_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(note): Extension<Note>,
) -> ApiResult<ApiResponse<()>> {
    state.store.delete_note(note.id).await?;
    Ok(ApiResponse::no_content())
}

/// PATCH /notes/:note_id - Partial update of `{name, content, folderId}`
pub async fn patch(
    State(state): State<AppState>,
    Extension(note): Extension<Note>,
    JsonBody(body): JsonBody<UpdateNote>,
) -> ApiResult<ApiResponse<()>> {
    let patch = body.into_patch()?;
    if patch.is_empty() {
        return Err(ApiError::bad_request(
            "Request body must contain either 'name', 'content', or 'folderId'",
        ));
    }

    state.store.update_note(note.id, patch).await?;
    Ok(ApiResponse::no_content())
}
