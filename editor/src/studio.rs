//! Studio session: the editor wired to a layout store.
//!
//! DESIGN
//! ======
//! `Studio` owns the editor and a store client and runs the user-facing
//! flows around them: the first manual save that names a layout, loading a
//! named layout, starting a new one, and refreshing the layout picker.
//! Gestures run through [`Studio::perform`], which executes the gesture on
//! the editor and sends any autosave writes it produced to the store.
//!
//! Until a manual save or a load names the layout, changes are not
//! persisted. After that every change overwrites the stored document.
//!
//! ERROR HANDLING
//! ==============
//! Every failure ends the one operation that hit it and is returned to the
//! host to show the user. Nothing is retried. A failed load leaves the
//! current tree exactly as it was. A failed autosave leaves the gesture's
//! change in the tree and still hands the gesture's render actions back to
//! the host, with the failure beside them; the next change re-sends the
//! whole document.

#[cfg(test)]
#[path = "studio_test.rs"]
mod studio_test;

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::engine::{Action, EditorCore};
use crate::error::EditorError;
use crate::serial::LayoutDocument;
use crate::store::{LayoutStore, StoreError, sanitize_layout_name};

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Network or server error: {0}")]
    NetworkOrServer(#[from] StoreError),
    #[error("Invalid layout data: {0}")]
    InvalidLayoutData(String),
    #[error("Save failed: {0}")]
    SaveRejected(String),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result of running a gesture through the studio.
#[derive(Debug)]
pub struct Dispatched {
    /// Host actions other than saves. Always present once the gesture ran.
    pub actions: Vec<Action>,
    /// Set when an autosave write failed.
    pub save_error: Option<StudioError>,
}

pub struct Studio<S> {
    editor: EditorCore,
    store: S,
    layout_names: Vec<String>,
    save_button_visible: bool,
}

impl<S: LayoutStore> Studio<S> {
    #[must_use]
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self { editor: EditorCore::new(config), store, layout_names: Vec::new(), save_button_visible: true }
    }

    // --- Queries ---

    #[must_use]
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Name the layout is saved under, once established.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.editor.autosave().target()
    }

    #[must_use]
    pub fn has_saved_once(&self) -> bool {
        self.editor.autosave().is_armed()
    }

    /// Text for the current-layout label. Empty until a name is known.
    #[must_use]
    pub fn name_label(&self) -> String {
        self.current_name()
            .map(|name| format!("Current layout: {name}"))
            .unwrap_or_default()
    }

    /// The manual save button is only offered until a name is established.
    #[must_use]
    pub fn save_button_visible(&self) -> bool {
        self.save_button_visible && self.editor.mode().affordances().save_load
    }

    /// Names shown in the layout picker, as of the last refresh.
    #[must_use]
    pub fn layout_names(&self) -> &[String] {
        &self.layout_names
    }

    // --- Flows ---

    /// Reload the layout picker from the store.
    ///
    /// # Errors
    ///
    /// `NetworkOrServer` if the store cannot be reached.
    pub async fn refresh_names(&mut self) -> Result<&[String], StudioError> {
        self.layout_names = self.store.list().await?;
        Ok(&self.layout_names)
    }

    /// First manual save: write the current layout under `name` and start
    /// autosaving under it. An empty name (prompt dismissed) does nothing.
    ///
    /// # Errors
    ///
    /// `SaveRejected` with the store's message if it refused the write,
    /// `NetworkOrServer` if it could not be reached.
    pub async fn save_as(&mut self, name: &str) -> Result<(), StudioError> {
        if name.is_empty() {
            return Ok(());
        }
        let body = self
            .editor
            .document()
            .to_json()
            .map_err(|e| StudioError::InvalidLayoutData(e.to_string()))?;
        self.write(name, &body).await
    }

    /// Replace the tree with the stored layout `name` and autosave under it.
    ///
    /// # Errors
    ///
    /// `InvalidLayoutData` if the stored text is not a layout array (the
    /// tree is left unchanged), `NetworkOrServer` if the store could not be
    /// reached.
    pub async fn load(&mut self, name: &str) -> Result<Vec<Action>, StudioError> {
        let text = self.store.load(name).await?;
        let doc = LayoutDocument::from_json(&text).map_err(|e| {
            warn!(%name, error = %e, "load: rejected layout data");
            StudioError::InvalidLayoutData(e.to_string())
        })?;
        let actions = self
            .editor
            .load_document(&doc)
            .map_err(|e| StudioError::InvalidLayoutData(e.to_string()))?;
        self.editor.autosave_mut().arm(sanitize_layout_name(name));
        self.save_button_visible = false;
        info!(%name, rows = self.editor.layout().len(), "layout loaded");
        Ok(actions)
    }

    /// Start an unnamed layout: one selector row, autosave off, save button
    /// back.
    pub fn new_layout(&mut self) -> Vec<Action> {
        self.editor.autosave_mut().disarm();
        self.save_button_visible = true;
        self.editor.reset()
    }

    /// Run a gesture and send any autosave writes it produced.
    ///
    /// # Errors
    ///
    /// `Editor` if the gesture was refused. A failed autosave write is not
    /// an error here: the gesture has been applied, so its host actions
    /// come back in [`Dispatched`] alongside the save failure.
    pub async fn perform<F>(&mut self, gesture: F) -> Result<Dispatched, StudioError>
    where
        F: FnOnce(&mut EditorCore) -> Result<Vec<Action>, EditorError>,
    {
        let actions = gesture(&mut self.editor)?;
        Ok(self.dispatch(actions).await)
    }

    /// Send every `Save` action to the store and hand back the rest. The
    /// first failed write stops the remaining writes.
    pub async fn dispatch(&mut self, actions: Vec<Action>) -> Dispatched {
        let mut rest = Vec::with_capacity(actions.len());
        let mut saves = Vec::new();
        for action in actions {
            match action {
                Action::Save(request) => saves.push(request),
                other => rest.push(other),
            }
        }
        let mut save_error = None;
        for request in saves {
            if let Err(e) = self.write(&request.name, &request.body).await {
                save_error = Some(e);
                break;
            }
        }
        Dispatched { actions: rest, save_error }
    }

    async fn write(&mut self, name: &str, body: &str) -> Result<(), StudioError> {
        let response = self.store.save(name, body).await.map_err(|e| {
            warn!(%name, error = %e, "save: store unreachable");
            StudioError::from(e)
        })?;
        if !response.success {
            let message = response.error.unwrap_or_else(|| "Unknown error".to_owned());
            warn!(%name, error = %message, "save: rejected by store");
            return Err(StudioError::SaveRejected(message));
        }
        self.editor.autosave_mut().arm(sanitize_layout_name(name));
        self.save_button_visible = false;
        info!(%name, bytes = body.len(), "layout saved");
        self.refresh_names().await?;
        Ok(())
    }
}
