//! Studio / view mode and the editing affordances each mode exposes.
//!
//! Switching modes is purely presentational: the tree is never touched.
//! The engine additionally refuses mutating gestures in view mode so a host
//! that forgets to hide a control still cannot edit a read-only page.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

/// Top-level editor mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Editing enabled.
    #[default]
    Studio,
    /// Read-only presentation of the same tree.
    View,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Studio => Self::View,
            Self::View => Self::Studio,
        }
    }

    #[must_use]
    pub fn is_editable(self) -> bool {
        self == Self::Studio
    }

    #[must_use]
    pub fn affordances(self) -> Affordances {
        match self {
            Self::Studio => Affordances::all(),
            Self::View => Affordances::none(),
        }
    }
}

/// Which editing controls the host should render.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// "Add row above/below" buttons.
    pub add_row: bool,
    /// Per-row delete button.
    pub delete_row: bool,
    /// Row and column drag handles.
    pub drag_handles: bool,
    /// The "change layout" button and the column-count selector.
    pub change_layout: bool,
    /// Row height grow/shrink buttons.
    pub row_height: bool,
    /// Save button and layout picker.
    pub save_load: bool,
}

impl Affordances {
    #[must_use]
    pub fn all() -> Self {
        Self {
            add_row: true,
            delete_row: true,
            drag_handles: true,
            change_layout: true,
            row_height: true,
            save_load: true,
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            add_row: false,
            delete_row: false,
            drag_handles: false,
            change_layout: false,
            row_height: false,
            save_load: false,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.add_row || self.delete_row || self.drag_handles || self.change_layout || self.row_height || self.save_load
    }
}
