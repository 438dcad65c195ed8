//! Change observation and autosave.
//!
//! The layout reports each structural mutation to the engine, which fans it
//! out to every [`LayoutObserver`]. [`Autosave`] is subscribed once when the
//! engine is built. Until a manual save (or a load) establishes a layout
//! name it ignores changes; afterwards every change produces one full
//! document overwrite under that name. Nothing is queued or diffed.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use tracing::{debug, error};

use crate::doc::{Layout, LayoutChange};
use crate::engine::Action;
use crate::serial;

/// A full-document write the host must send to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub name: String,
    pub body: String,
}

/// Something that wants to hear about structural changes.
pub trait LayoutObserver: Send {
    /// Called once per applied change with the layout as it now stands.
    fn on_change(&mut self, layout: &Layout, change: &LayoutChange) -> Option<Action>;
}

/// Re-persists the whole layout after every change once a name is known.
#[derive(Debug, Clone, Default)]
pub struct Autosave {
    target: Option<String>,
}

impl Autosave {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start saving under `name`. Called after the first successful manual
    /// save and after loading a named layout.
    pub fn arm(&mut self, name: impl Into<String>) {
        self.target = Some(name.into());
    }

    /// Stop saving (the user started a new, unnamed layout).
    pub fn disarm(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.target.is_some()
    }

    /// Name changes are currently saved under.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Build a full-document write for the current layout, if armed.
    #[must_use]
    pub fn request(&self, layout: &Layout) -> Option<SaveRequest> {
        let name = self.target.as_ref()?;
        match serial::serialize(layout).to_json() {
            Ok(body) => Some(SaveRequest { name: name.clone(), body }),
            Err(e) => {
                error!(error = %e, %name, "autosave: layout encode failed");
                None
            }
        }
    }
}

impl LayoutObserver for Autosave {
    fn on_change(&mut self, layout: &Layout, change: &LayoutChange) -> Option<Action> {
        if matches!(change, LayoutChange::Replaced { .. }) {
            return None;
        }
        let request = self.request(layout)?;
        debug!(name = %request.name, rows = layout.len(), ?change, "autosave");
        Some(Action::Save(request))
    }
}
