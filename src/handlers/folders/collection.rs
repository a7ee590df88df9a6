use axum::{
    extract::{OriginalUri, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use crate::api::format::FolderResponse;
use crate::app::AppState;
use crate::database::models::NewFolder;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{resource_location, ApiResponse, JsonBody};
use crate::validation::folder_validation_error;

#[derive(Debug, Deserialize)]
pub struct CreateFolder {
    pub name: Option<String>,
}

/// GET /folders - All folders in storage order
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<Vec<FolderResponse>>> {
    let folders = state.store.list_folders().await?;
    Ok(Json(folders.iter().map(FolderResponse::from).collect()))
}

/// POST /folders - Create a folder from `{name}`
pub async fn post(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody<CreateFolder>,
) -> ApiResult<ApiResponse<FolderResponse>> {
    let name = body.name.ok_or_else(|| ApiError::missing_field("name"))?;

    if let Some(message) = folder_validation_error(Some(&name)) {
        return Err(ApiError::bad_request(message));
    }

    let folder = state.store.insert_folder(NewFolder { name }).await?;
    info!("Folder with id {} created", folder.id);

    let location = resource_location(uri.path(), folder.id);
    Ok(ApiResponse::created(FolderResponse::from(folder), location))
}
