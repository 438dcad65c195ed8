//! Layout store routes: list, save, load.
//!
//! Save and load answer `200` even when they fail, reporting the failure in
//! the body (`{ "success": false, "error": ... }`) the way the editor's store
//! client expects. Only unexpected I/O on listing surfaces as a status code.

#[cfg(test)]
#[path = "layouts_test.rs"]
mod layouts_test;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use editor::store::{SaveResponse, not_found_body};
use serde::Deserialize;
use tracing::{info, warn};

use crate::services::store::StoreError;
use crate::state::AppState;

const WRITE_FAILED_MESSAGE: &str = "Failed to write file";

/// Save request. Missing fields are treated as empty so they get the
/// store's "missing" answer instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadQuery {
    #[serde(default)]
    pub name: String,
}

/// `GET /api/layouts`: stored layout names, sorted.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<String>>, StatusCode> {
    state.store.list().await.map(Json).map_err(|e| {
        warn!(error = %e, "list layouts failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// `POST /api/layouts/save`: overwrite one layout document.
pub async fn save(State(state): State<AppState>, Json(form): Json<SaveForm>) -> Json<SaveResponse> {
    match state.store.save(&form.name, &form.data).await {
        Ok(()) => {
            info!(name = %form.name, bytes = form.data.len(), "layout saved");
            Json(SaveResponse::ok())
        }
        Err(e) => {
            warn!(name = %form.name, error = %e, "layout save rejected");
            Json(SaveResponse::failed(save_error_message(&e)))
        }
    }
}

/// `GET /api/layouts/load?name=`: the stored document verbatim.
pub async fn load(State(state): State<AppState>, Query(query): Query<LoadQuery>) -> Response {
    match state.store.load(&query.name).await {
        Ok(text) => json_text(text),
        Err(StoreError::NotFound) => json_text(not_found_body()),
        Err(e) => {
            warn!(name = %query.name, error = %e, "layout load failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) fn save_error_message(err: &StoreError) -> String {
    match err {
        StoreError::Io(_) => WRITE_FAILED_MESSAGE.to_owned(),
        other => other.to_string(),
    }
}

fn json_text(body: String) -> Response {
    ([(CONTENT_TYPE, "application/json")], body).into_response()
}
