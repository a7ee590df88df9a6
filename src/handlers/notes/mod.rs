pub mod collection;
pub mod record;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::resolve_note;

pub use collection::get as collection_get;
pub use collection::post as collection_post;

pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::patch as record_patch;

/// `/` and `/:note_id`, to be nested under the notes prefix.
pub fn router(state: AppState) -> Router<AppState> {
    let record = Router::new()
        .route(
            "/:note_id",
            get(record_get).delete(record_delete).patch(record_patch),
        )
        .route_layer(from_fn_with_state(state, resolve_note));

    Router::new()
        .route("/", get(collection_get).post(collection_post))
        .merge(record)
}

/// `folderId` as sent by clients: a JSON integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FolderRef {
    Id(i64),
    Text(String),
}

impl FolderRef {
    pub fn to_id(&self) -> Result<i64, ApiError> {
        match self {
            FolderRef::Id(id) => Ok(*id),
            FolderRef::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| ApiError::bad_request("'folderId' must be an integer")),
        }
    }

    /// Zero and the empty string are treated as "not supplied" on update.
    pub fn is_blank(&self) -> bool {
        match self {
            FolderRef::Id(id) => *id == 0,
            FolderRef::Text(text) => text.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let n: FolderRef = serde_json::from_str("3").unwrap();
        let s: FolderRef = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(n.to_id().unwrap(), 3);
        assert_eq!(s.to_id().unwrap(), 4);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let s: FolderRef = serde_json::from_str("\"abc\"").unwrap();
        assert!(s.to_id().is_err());
    }

    #[test]
    fn blank_values() {
        assert!(FolderRef::Id(0).is_blank());
        assert!(FolderRef::Text(String::new()).is_blank());
        assert!(!FolderRef::Id(2).is_blank());
    }
}
