use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};

use crate::config::{normalize_base_path, AppConfig};
use crate::database::Storage;
use crate::error::panic_response;
use crate::handlers;

/// Per-request context: the storage handle every handler works through.
/// Cloning is cheap; the store itself is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    /// Prefix the resource routers are mounted under (`""` or e.g. `/api`).
    pub base_path: String,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, base_path: &str) -> Self {
        Self {
            store,
            base_path: normalize_base_path(base_path),
        }
    }
}

/// Composes the folder and note routers under the configured prefix with the
/// service-wide layers (panic fallback, body limit, CORS, request tracing).
///
/// Trailing slashes are trimmed before routing, so `/api/folders/` and
/// `/api/folders` reach the same handler.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = routes(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    // Router::layer runs after route matching; the path has to be rewritten outside it.
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// The bare routes with state attached and no middleware stack.
pub fn routes(state: AppState) -> Router {
    let base = state.base_path.clone();

    Router::new()
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .nest(&format!("{}/folders", base), handlers::folders::router(state.clone()))
        .nest(&format!("{}/notes", base), handlers::notes::router(state.clone()))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
