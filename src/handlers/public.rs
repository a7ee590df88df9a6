use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service name and version
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let base = &state.base_path;
    Json(json!({
        "name": "Noteful API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "folders": format!("{}/folders[/:folder_id]", base),
            "notes": format!("{}/notes[/:note_id]", base),
        }
    }))
}

/// GET /health - Storage connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
