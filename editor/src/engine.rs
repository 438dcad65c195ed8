use tracing::debug;

use crate::autosave::{Autosave, LayoutObserver, SaveRequest};
use crate::config::EditorConfig;
use crate::doc::{ColumnId, Layout, LayoutChange, RowId};
use crate::drag::{DragController, DragOutcome, DropTarget};
use crate::error::EditorError;
use crate::geom::{Placement, Point, Rect};
use crate::mode::Mode;
use crate::selector::{self, RowRender};
use crate::serial::{self, DecodeError, LayoutDocument};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from gesture handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Re-render rows from [`EditorCore::render`].
    RenderNeeded,
    /// Rebuild add/delete/drag controls on every row.
    RefreshRowControls,
    /// A row was inserted; the host may animate it in.
    RowInserted { id: RowId },
    /// A row was removed from the model; the host may animate its element
    /// out before detaching it.
    RowRemoved { id: RowId },
    /// Persist the full document under the given name.
    Save(SaveRequest),
}

/// Core editor state: the tree, the active drag, the mode, and the
/// observers that hear about every structural change.
///
/// Every gesture goes through here so each one reports its change to the
/// observers exactly once.
pub struct EditorCore {
    pub config: EditorConfig,
    layout: Layout,
    drag: DragController,
    mode: Mode,
    autosave: Autosave,
    observers: Vec<Box<dyn LayoutObserver>>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorCore {
    /// A fresh editor showing one row in selector state.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            layout: Layout::with_selector_row(),
            drag: DragController::new(),
            mode: Mode::default(),
            autosave: Autosave::new(),
            observers: Vec::new(),
        }
    }

    /// Register an additional observer. The autosave observer is always
    /// subscribed and runs first.
    pub fn subscribe(&mut self, observer: Box<dyn LayoutObserver>) {
        self.observers.push(observer);
    }

    // --- Queries ---

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub fn autosave(&self) -> &Autosave {
        &self.autosave
    }

    pub fn autosave_mut(&mut self) -> &mut Autosave {
        &mut self.autosave
    }

    /// The persisted form of the current tree.
    #[must_use]
    pub fn document(&self) -> LayoutDocument {
        serial::serialize(&self.layout)
    }

    /// Render model for every row.
    #[must_use]
    pub fn render(&self) -> Vec<RowRender> {
        selector::render(&self.layout, &self.config, self.mode, &self.drag)
    }

    // --- Mode ---

    /// Switch between studio and view mode. An active drag is ended first.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.drag.is_idle() {
            let outcome = self.drag.end(&self.layout);
            self.apply_outcome(outcome, &mut actions);
        }
        self.mode = mode;
        actions.push(Action::RenderNeeded);
        actions.push(Action::RefreshRowControls);
        actions
    }

    pub fn toggle_mode(&mut self) -> Vec<Action> {
        self.set_mode(self.mode.toggled())
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        if self.mode.is_editable() { Ok(()) } else { Err(EditorError::ReadOnly) }
    }

    // --- Rows ---

    /// Insert a selector-state row above or below `anchor`.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown anchor.
    pub fn add_row(&mut self, placement: Placement, anchor: RowId) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let change = self.layout.add_row(placement, anchor)?;
        let mut actions = Vec::new();
        if let LayoutChange::RowAdded { row, .. } = change {
            actions.push(Action::RowInserted { id: row });
        }
        actions.push(Action::RefreshRowControls);
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// Delete a row. Deleting the last remaining row is refused and yields
    /// no actions.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown row.
    pub fn delete_row(&mut self, id: RowId) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let Some(change) = self.layout.delete_row(id)? else {
            debug!(row = %id, "refusing to delete the last row");
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::RowRemoved { id }, Action::RefreshRowControls];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// Choose a column count from the selector.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `InvalidColumnCount` for a count the
    /// selector does not offer, `RowNotFound` for an unknown row.
    pub fn set_column_count(&mut self, id: RowId, count: u32) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let change = self.layout.set_column_count(id, count, &self.config.column_options)?;
        let mut actions = vec![Action::RenderNeeded, Action::RefreshRowControls];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// "Change layout": reopen the selector on a populated row.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown row.
    pub fn show_selector(&mut self, id: RowId) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let Some(change) = self.layout.show_selector(id)? else {
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::RenderNeeded, Action::RefreshRowControls];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// Grow (`+1`) or shrink (`-1`) a row. A no-op when height controls are
    /// disabled, the row is showing the selector, or the height is already
    /// at its bound.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown row.
    pub fn set_row_height(&mut self, id: RowId, delta: i8) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let row = self.layout.row(id).ok_or(EditorError::RowNotFound(id))?;
        if !self.config.height_enabled || row.is_selector() {
            return Ok(Vec::new());
        }
        let Some(change) = self.layout.set_row_height(id, delta)? else {
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::RenderNeeded];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// Move a row next to another without a drag gesture.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown row.
    pub fn reorder_row(&mut self, moved: RowId, target: RowId, placement: Placement) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let Some(change) = self.layout.reorder_row(moved, target, placement)? else {
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::RenderNeeded, Action::RefreshRowControls];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    /// Move a column within its row without a drag gesture.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` / `ColumnNotFound` when the
    /// columns are not both in `row`.
    pub fn reorder_column(
        &mut self,
        row: RowId,
        moved: ColumnId,
        target: ColumnId,
        placement: Placement,
    ) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let Some(change) = self.layout.reorder_column(row, moved, target, placement)? else {
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::RenderNeeded];
        self.commit(change, &mut actions);
        Ok(actions)
    }

    // --- Drag ---

    /// Drag-start on a row handle. Any drag still in progress is ended first.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` for an unknown row.
    pub fn begin_row_drag(&mut self, row: RowId) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let mut actions = self.end_drag();
        self.drag.begin_row(&self.layout, row)?;
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Drag-start on a column handle. Any drag still in progress is ended
    /// first.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, `RowNotFound` / `ColumnNotFound` when the
    /// column is not in `row`.
    pub fn begin_column_drag(&mut self, row: RowId, column: ColumnId) -> Result<Vec<Action>, EditorError> {
        self.ensure_editable()?;
        let mut actions = self.end_drag();
        self.drag.begin_column(&self.layout, row, column)?;
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Drag-over a row.
    ///
    /// # Errors
    ///
    /// `RowNotFound` for an unknown target.
    pub fn drag_over_row(&mut self, target: RowId, pointer: Point, bounds: Rect) -> Result<Vec<Action>, EditorError> {
        if self.drag.is_idle() {
            return Ok(Vec::new());
        }
        self.drag.hover_row(&mut self.layout, target, pointer, bounds)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// Drag-over a column.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` for a target outside the dragged column's row.
    pub fn drag_over_column(
        &mut self,
        target_row: RowId,
        target: ColumnId,
        pointer: Point,
        bounds: Rect,
    ) -> Result<Vec<Action>, EditorError> {
        if self.drag.is_idle() {
            return Ok(Vec::new());
        }
        self.drag.hover_column(&mut self.layout, target_row, target, pointer, bounds)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// Drag-leave: clear a drop-target highlight.
    pub fn drag_leave(&mut self, target: DropTarget) -> Vec<Action> {
        if self.drag.drop_target() == Some(target) {
            self.drag.leave(target);
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    /// Drop the dragged row onto `target`. Always finishes the drag; a
    /// target that has gone away behaves like a release outside any row.
    pub fn drop_on_row(&mut self, target: RowId, pointer: Point, bounds: Rect) -> Vec<Action> {
        if self.drag.is_idle() {
            return Vec::new();
        }
        let outcome = self.drag.drop_row(&mut self.layout, target, pointer, bounds);
        self.finish_drop(outcome)
    }

    /// Drop the dragged column onto `target`. Always finishes the drag.
    pub fn drop_on_column(&mut self, target_row: RowId, target: ColumnId, pointer: Point, bounds: Rect) -> Vec<Action> {
        if self.drag.is_idle() {
            return Vec::new();
        }
        let outcome = self.drag.drop_column(&mut self.layout, target_row, target, pointer, bounds);
        self.finish_drop(outcome)
    }

    /// Drag-end without a drop.
    pub fn end_drag(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.drag.is_idle() {
            return actions;
        }
        let outcome = self.drag.end(&self.layout);
        actions.push(Action::RenderNeeded);
        self.apply_outcome(outcome, &mut actions);
        actions
    }

    fn finish_drop(&mut self, outcome: DragOutcome) -> Vec<Action> {
        let mut actions = vec![Action::RenderNeeded];
        self.apply_outcome(outcome, &mut actions);
        actions
    }

    fn apply_outcome(&mut self, outcome: DragOutcome, actions: &mut Vec<Action>) {
        if outcome.refresh_rows {
            actions.push(Action::RefreshRowControls);
        }
        if let Some(change) = outcome.change {
            self.commit(change, actions);
        }
    }

    // --- Wholesale ---

    /// Replace the tree with a decoded document. An empty document leaves
    /// one selector row so the page is never blank. Observers see a single
    /// `Replaced` change, which autosave ignores.
    ///
    /// # Errors
    ///
    /// Returns a decode error and leaves the current tree untouched.
    pub fn load_document(&mut self, doc: &LayoutDocument) -> Result<Vec<Action>, DecodeError> {
        let mut layout = serial::deserialize(doc)?;
        if layout.is_empty() {
            layout.push_row();
        }
        Ok(self.replace(layout))
    }

    /// Clear to a single selector row.
    pub fn reset(&mut self) -> Vec<Action> {
        self.replace(Layout::with_selector_row())
    }

    fn replace(&mut self, layout: Layout) -> Vec<Action> {
        self.drag = DragController::new();
        let change = self.layout.replace(layout);
        let mut actions = vec![Action::RenderNeeded, Action::RefreshRowControls];
        self.commit(change, &mut actions);
        actions
    }

    fn commit(&mut self, change: LayoutChange, actions: &mut Vec<Action>) {
        debug!(?change, rows = self.layout.len(), "layout changed");
        if let Some(action) = self.autosave.on_change(&self.layout, &change) {
            actions.push(action);
        }
        for observer in &mut self.observers {
            if let Some(action) = observer.on_change(&self.layout, &change) {
                actions.push(action);
            }
        }
    }
}
