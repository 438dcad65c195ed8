//! Layout store client: list, save, and load named layout documents.
//!
//! DESIGN
//! ======
//! The store is a dumb blob store keyed by a sanitized name. It never looks
//! inside a document. [`LayoutStore`] is the seam the studio session talks
//! to; [`HttpLayoutStore`] speaks to the bundled server and
//! [`MemoryLayoutStore`] keeps everything in process.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and non-2xx responses are `StoreError`s. A store that
//! answered but refused the write reports it in-band through
//! [`SaveResponse`]; a load of an unknown name returns the store's error
//! object as the body, which the caller rejects as invalid layout data.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::consts::{MISSING_NAME_OR_DATA_MESSAGE, NOT_FOUND_MESSAGE};

/// Route listing stored layout names.
pub const LIST_PATH: &str = "/api/layouts";
/// Route accepting a [`SaveBody`].
pub const SAVE_PATH: &str = "/api/layouts/save";
/// Route returning a stored document, `?name=` selects it.
pub const LOAD_PATH: &str = "/api/layouts/load";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Request body for a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBody {
    pub name: String,
    pub data: String,
}

/// The store's answer to a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}

/// Body returned by a load for an unknown name.
#[must_use]
pub fn not_found_body() -> String {
    serde_json::json!({ "success": false, "error": NOT_FOUND_MESSAGE }).to_string()
}

/// Keep only `[A-Za-z0-9_-]`. Anything else is dropped, not replaced.
#[must_use]
pub fn sanitize_layout_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Names of every stored layout.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrite the document stored under `name`.
    async fn save(&self, name: &str, document: &str) -> Result<SaveResponse, StoreError>;

    /// Stored text for `name`, verbatim. Unknown names yield the store's
    /// error object as the body.
    async fn load(&self, name: &str) -> Result<String, StoreError>;
}

// =============================================================================
// HTTP
// =============================================================================

/// Store client for the layout server.
#[derive(Debug, Clone)]
pub struct HttpLayoutStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLayoutStore {
    /// Client for a server at `base_url` (e.g. `http://localhost:3000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() { Ok(resp) } else { Err(StoreError::Status(status.as_u16())) }
}

#[async_trait]
impl LayoutStore for HttpLayoutStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let resp = self.client.get(self.url(LIST_PATH)).send().await.map_err(transport)?;
        check_status(resp)?
            .json::<Vec<String>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn save(&self, name: &str, document: &str) -> Result<SaveResponse, StoreError> {
        let body = SaveBody { name: name.to_owned(), data: document.to_owned() };
        let resp = self
            .client
            .post(self.url(SAVE_PATH))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?
            .json::<SaveResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn load(&self, name: &str) -> Result<String, StoreError> {
        let resp = self
            .client
            .get(self.url(LOAD_PATH))
            .query(&[("name", name)])
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?.text().await.map_err(transport)
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// In-process store with the same naming and error behavior as the server.
/// Every save call is recorded, accepted or not.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    layouts: Mutex<BTreeMap<String, String>>,
    calls: Mutex<Vec<SaveBody>>,
}

impl MemoryLayoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a layout.
    #[must_use]
    pub fn with_layout(mut self, name: &str, document: &str) -> Self {
        self.layouts.get_mut().insert(sanitize_layout_name(name), document.to_owned());
        self
    }

    /// Every save call received so far, in order.
    pub async fn save_calls(&self) -> Vec<SaveBody> {
        self.calls.lock().await.clone()
    }

    /// Stored text for `name`, if any.
    pub async fn get(&self, name: &str) -> Option<String> {
        self.layouts.lock().await.get(name).cloned()
    }
}

#[async_trait]
impl LayoutStore for MemoryLayoutStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.layouts.lock().await.keys().cloned().collect())
    }

    async fn save(&self, name: &str, document: &str) -> Result<SaveResponse, StoreError> {
        self.calls
            .lock()
            .await
            .push(SaveBody { name: name.to_owned(), data: document.to_owned() });
        let name = sanitize_layout_name(name);
        if name.is_empty() || document.is_empty() {
            return Ok(SaveResponse::failed(MISSING_NAME_OR_DATA_MESSAGE));
        }
        self.layouts.lock().await.insert(name, document.to_owned());
        Ok(SaveResponse::ok())
    }

    async fn load(&self, name: &str) -> Result<String, StoreError> {
        let name = sanitize_layout_name(name);
        Ok(self
            .layouts
            .lock()
            .await
            .get(&name)
            .cloned()
            .unwrap_or_else(not_found_body))
    }
}
