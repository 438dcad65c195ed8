//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The layout store API lives under `/api/layouts`, next to a health probe.
//! When a static directory is configured, the front end is served from it
//! for every path the API does not claim.

pub mod layouts;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use editor::store::{LIST_PATH, LOAD_PATH, SAVE_PATH};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router: layout API, health probe, optional static
/// assets.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route(LIST_PATH, get(layouts::list))
        .route(SAVE_PATH, post(layouts::save))
        .route(LOAD_PATH, get(layouts::load))
        .route("/healthz", get(healthz));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };

    router
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
