//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! layout store is the only shared resource; it holds no locks because each
//! request reads or replaces one whole file.

use std::sync::Arc;

use crate::services::store::FileLayoutStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileLayoutStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: FileLayoutStore) -> Self {
        Self { store: Arc::new(store) }
    }
}
