use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::app::AppState;
use crate::error::ApiError;

/// Looks up the folder named by `/:folder_id` and stores it as a request extension.
/// Every verb under that path answers 404 when the folder is missing.
pub async fn resolve_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let missing = || {
        error!("Folder with {} not found", folder_id);
        ApiError::not_found("Folder doesn't exist")
    };

    let id = folder_id.parse::<i64>().map_err(|_| missing())?;
    let folder = state.store.get_folder(id).await?.ok_or_else(missing)?;

    request.extensions_mut().insert(folder);
    Ok(next.run(request).await)
}

/// Note counterpart of [`resolve_folder`] for `/:note_id`.
pub async fn resolve_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let missing = || {
        error!("Note with {} not found", note_id);
        ApiError::not_found("Note doesn't exist")
    };

    let id = note_id.parse::<i64>().map_err(|_| missing())?;
    let note = state.store.get_note(id).await?.ok_or_else(missing)?;

    request.extensions_mut().insert(note);
    Ok(next.run(request).await)
}
