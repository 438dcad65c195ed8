//! Drag-and-drop reordering of rows and columns.
//!
//! `DragController` is the gesture state machine tracked between drag-start
//! and drag-end/drop. Only one drag can be active at a time; the controller
//! is owned by the engine rather than living in ambient global state.
//!
//! While a drag is active every hover recomputes the drop position with the
//! midpoint rule and moves the dragged element in the model as a live
//! preview. The preview moves are provisional: no change is reported for
//! them individually. When the gesture finishes the final order is compared
//! with the order captured at drag-start and at most one change is reported
//! for the whole gesture.
//!
//! Column drags are scoped to the row they started in. Every other row is
//! flagged "not allowed" for the duration of the drag and hovering one of
//! them never moves anything.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::HashSet;

use tracing::debug;

use crate::doc::{ColumnId, Layout, LayoutChange, RowId};
use crate::error::EditorError;
use crate::geom::{Placement, Point, Rect};

/// The element currently highlighted as a drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Row(RowId),
    Column(ColumnId),
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A row is being dragged by its handle.
    DraggingRow {
        /// Row being dragged.
        row: RowId,
        /// Row order when the drag began.
        origin: Vec<RowId>,
    },
    /// A column is being dragged by its handle.
    DraggingColumn {
        /// Row the column belongs to. The drag never leaves it.
        row: RowId,
        /// Column being dragged.
        column: ColumnId,
        /// Column order within `row` when the drag began.
        origin: Vec<ColumnId>,
    },
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragOutcome {
    /// The single net change made by the gesture, if the order differs
    /// from drag-start.
    pub change: Option<LayoutChange>,
    /// Row controls must be rebuilt (a row drop that changed order).
    pub refresh_rows: bool,
}

/// Tracks the active drag and its visual markers.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    drop_target: Option<DropTarget>,
    not_allowed: HashSet<RowId>,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    #[must_use]
    pub fn dragged_row(&self) -> Option<RowId> {
        match self.state {
            DragState::DraggingRow { row, .. } => Some(row),
            _ => None,
        }
    }

    #[must_use]
    pub fn dragged_column(&self) -> Option<ColumnId> {
        match self.state {
            DragState::DraggingColumn { column, .. } => Some(column),
            _ => None,
        }
    }

    #[must_use]
    pub fn drop_target(&self) -> Option<DropTarget> {
        self.drop_target
    }

    /// Whether a row's columns and handles should show the "not allowed"
    /// indicator.
    #[must_use]
    pub fn is_not_allowed(&self, row: RowId) -> bool {
        self.not_allowed.contains(&row)
    }

    // --- Start ---

    /// Begin dragging a row by its handle.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if the row is missing.
    pub fn begin_row(&mut self, layout: &Layout, row: RowId) -> Result<(), EditorError> {
        if layout.index_of(row).is_none() {
            return Err(EditorError::RowNotFound(row));
        }
        self.clear_markers();
        self.state = DragState::DraggingRow { row, origin: layout.row_order() };
        Ok(())
    }

    /// Begin dragging a column by its handle. Every other row is flagged
    /// "not allowed".
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` or `ColumnNotFound` if the column is not in the
    /// given row.
    pub fn begin_column(&mut self, layout: &Layout, row: RowId, column: ColumnId) -> Result<(), EditorError> {
        let origin = layout.column_order(row).ok_or(EditorError::RowNotFound(row))?;
        if !origin.contains(&column) {
            return Err(EditorError::ColumnNotFound { row, column });
        }
        self.clear_markers();
        self.not_allowed = layout
            .rows()
            .iter()
            .map(crate::doc::Row::id)
            .filter(|id| *id != row)
            .collect();
        self.state = DragState::DraggingColumn { row, column, origin };
        Ok(())
    }

    // --- Hover ---

    /// Pointer moved over `target` during a drag. For a row drag this
    /// live-moves the dragged row before or after `target` by the vertical
    /// midpoint rule. Returns whether the model order changed.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if `target` is missing.
    pub fn hover_row(
        &mut self,
        layout: &mut Layout,
        target: RowId,
        pointer: Point,
        bounds: Rect,
    ) -> Result<bool, EditorError> {
        let DragState::DraggingRow { row, .. } = self.state else {
            return Ok(false);
        };
        if row == target {
            return Ok(false);
        }
        self.drop_target = Some(DropTarget::Row(target));
        let moved = layout.reorder_row(row, target, Placement::vertical(pointer, bounds))?;
        Ok(moved.is_some())
    }

    /// Pointer moved over column `target` in row `target_row` during a
    /// drag. Only moves anything when a column from the same row is being
    /// dragged. Returns whether the model order changed.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if `target` is not in the dragged row.
    pub fn hover_column(
        &mut self,
        layout: &mut Layout,
        target_row: RowId,
        target: ColumnId,
        pointer: Point,
        bounds: Rect,
    ) -> Result<bool, EditorError> {
        let DragState::DraggingColumn { row, column, .. } = self.state else {
            return Ok(false);
        };
        if row != target_row || column == target {
            return Ok(false);
        }
        self.drop_target = Some(DropTarget::Column(target));
        let moved = layout.reorder_column(row, column, target, Placement::horizontal(pointer, bounds))?;
        Ok(moved.is_some())
    }

    /// Pointer left an element. Clears its drop-target highlight.
    pub fn leave(&mut self, target: DropTarget) {
        if self.drop_target == Some(target) {
            self.drop_target = None;
        }
    }

    // --- Finish ---

    /// Drop the dragged row onto `target`. A target that is no longer in
    /// the layout drops nothing further; the gesture still finishes and
    /// reports the net move made by earlier hovers.
    pub fn drop_row(&mut self, layout: &mut Layout, target: RowId, pointer: Point, bounds: Rect) -> DragOutcome {
        if let Err(e) = self.hover_row(layout, target, pointer, bounds) {
            debug!(error = %e, "drop on a row that is gone");
        }
        self.finish(layout, true)
    }

    /// Drop the dragged column onto `target`. Dropping into a different row,
    /// or onto a column that is gone, changes nothing beyond what earlier
    /// hovers already did.
    pub fn drop_column(
        &mut self,
        layout: &mut Layout,
        target_row: RowId,
        target: ColumnId,
        pointer: Point,
        bounds: Rect,
    ) -> DragOutcome {
        if let Err(e) = self.hover_column(layout, target_row, target, pointer, bounds) {
            debug!(error = %e, "drop on a column that is gone");
        }
        self.finish(layout, true)
    }

    /// Drag ended without a drop (released outside any target). Live moves
    /// made while hovering stay in place.
    pub fn end(&mut self, layout: &Layout) -> DragOutcome {
        self.finish(layout, false)
    }

    fn finish(&mut self, layout: &Layout, dropped: bool) -> DragOutcome {
        let state = std::mem::take(&mut self.state);
        self.clear_markers();
        match state {
            DragState::Idle => DragOutcome::default(),
            DragState::DraggingRow { row, origin } => {
                let change = net_row_move(layout, row, &origin);
                let refresh_rows = dropped && change.is_some();
                DragOutcome { change, refresh_rows }
            }
            DragState::DraggingColumn { row, column, origin } => {
                DragOutcome { change: net_column_move(layout, row, column, &origin), refresh_rows: false }
            }
        }
    }

    fn clear_markers(&mut self) {
        self.drop_target = None;
        self.not_allowed.clear();
    }
}

fn net_row_move(layout: &Layout, row: RowId, origin: &[RowId]) -> Option<LayoutChange> {
    if layout.row_order() == origin {
        return None;
    }
    let from = origin.iter().position(|id| *id == row)?;
    let to = layout.index_of(row)?;
    Some(LayoutChange::RowMoved { row, from, to })
}

fn net_column_move(layout: &Layout, row: RowId, column: ColumnId, origin: &[ColumnId]) -> Option<LayoutChange> {
    let current = layout.column_order(row)?;
    if current == origin {
        return None;
    }
    let from = origin.iter().position(|id| *id == column)?;
    let to = current.iter().position(|id| *id == column)?;
    Some(LayoutChange::ColumnMoved { row, column, from, to })
}
