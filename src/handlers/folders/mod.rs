pub mod collection;
pub mod record;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::app::AppState;
use crate::middleware::resolve_folder;

// Re-export handler functions for use in routing
pub use collection::get as collection_get;
pub use collection::post as collection_post;

pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::patch as record_patch;

/// `/` and `/:folder_id`, to be nested under the folders prefix.
pub fn router(state: AppState) -> Router<AppState> {
    let record = Router::new()
        .route(
            "/:folder_id",
            get(record_get).delete(record_delete).patch(record_patch),
        )
        .route_layer(from_fn_with_state(state, resolve_folder));

    Router::new()
        .route("/", get(collection_get).post(collection_post))
        .merge(record)
}
