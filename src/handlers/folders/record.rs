use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Deserialize;

use crate::api::format::FolderResponse;
use crate::app::AppState;
use crate::database::models::{Folder, FolderPatch};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiResponse, JsonBody};

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFolder {
    pub name: Option<String>,
}

impl UpdateFolder {
    /// Empty strings count as "not supplied", like any other falsy value.
    fn into_patch(self) -> FolderPatch {
        FolderPatch {
            name: self.name.filter(|name| !name.is_empty()),
        }
    }
}

/// GET /folders/:folder_id
pub async fn get(Extension(folder): Extension<Folder>) -> Json<FolderResponse> {
    Json(FolderResponse::from(folder))
}

/// DELETE /folders/:folder_id - Notes in the folder go with it
pub async fn delete(
    State(state): State<AppState>,
    Extension(folder): Extension<Folder>,
) -> ApiResult<ApiResponse<()>> {
    let removed = state.store.delete_folder(folder.id).await?;
    tracing::debug!("Deleted folder {} ({} row(s))", folder.id, removed);
    Ok(ApiResponse::no_content())
}

/// PATCH /folders/:folder_id - Partial update of `{name}`
pub async fn patch(
    State(state): State<AppState>,
    Extension(folder): Extension<Folder>,
    JsonBody(body): JsonBody<UpdateFolder>,
) -> ApiResult<ApiResponse<()>> {
    let patch = body.into_patch();
    if patch.is_empty() {
        return Err(ApiError::bad_request("Request body must contain 'name'"));
    }

    state.store.update_folder(folder.id, patch).await?;
    Ok(ApiResponse::no_content())
}
