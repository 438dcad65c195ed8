//! Document model: rows, columns, and the ordered layout that owns them.
//!
//! A page is a vertical stack of [`Row`]s. Each row is either in selector
//! state (no columns yet, the column-count picker is showing) or populated
//! with N empty [`Column`] slots. Order is meaningful on both axes: row order
//! is the stacking order on the page and column order is the left-to-right
//! order inside a row.
//!
//! Every successful mutation reports what happened as a [`LayoutChange`].
//! Mutations that turn out to be no-ops (moving a row onto itself, deleting
//! the last row, clamping a height that is already at its bound) report
//! `None` so callers can tell a gesture that changed nothing from one that
//! did. The engine turns changes into observer notifications.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use uuid::Uuid;

use crate::config::ColumnOptions;
use crate::consts::{DEFAULT_ROW_HEIGHT, MAX_ROW_HEIGHT, MIN_ROW_HEIGHT};
use crate::error::EditorError;
use crate::geom::Placement;

/// In-memory identity of a row. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(Uuid);

impl RowId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// In-memory identity of a column slot. Never persisted; a round trip
/// through the serializer mints fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(Uuid);

impl ColumnId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An empty placeholder slot inside a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    id: ColumnId,
}

impl Column {
    #[must_use]
    pub fn new() -> Self {
        Self { id: ColumnId::new() }
    }

    #[must_use]
    pub fn id(&self) -> ColumnId {
        self.id
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

/// A horizontal band of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    columns: Vec<Column>,
    /// Most recently chosen column count, kept while the selector is
    /// reopened so the picker can highlight it. Zero if never chosen.
    last_count: u32,
    /// Height multiplier in `[MIN_ROW_HEIGHT, MAX_ROW_HEIGHT]`.
    height: u8,
}

impl Row {
    /// A fresh row in selector state.
    #[must_use]
    pub fn selector() -> Self {
        Self { id: RowId::new(), columns: Vec::new(), last_count: 0, height: MIN_ROW_HEIGHT }
    }

    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Number of columns currently shown. Zero while the selector is open.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        u32::try_from(self.columns.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether the column-count picker is showing for this row.
    #[must_use]
    pub fn is_selector(&self) -> bool {
        self.columns.is_empty()
    }

    /// The count chosen most recently, even if the selector has since been
    /// reopened. Zero if no count was ever chosen.
    #[must_use]
    pub fn last_count(&self) -> u32 {
        self.last_count
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[must_use]
    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Replace the columns with `count` fresh slots. Zero reopens the
    /// selector. Leaving selector state resets the height to the default.
    pub(crate) fn fill(&mut self, count: u32) {
        if count == 0 {
            self.open_selector();
            return;
        }
        let was_selector = self.is_selector();
        self.columns = (0..count).map(|_| Column::new()).collect();
        self.last_count = count;
        if was_selector {
            self.height = DEFAULT_ROW_HEIGHT;
        }
    }

    fn open_selector(&mut self) {
        self.columns.clear();
        self.height = MIN_ROW_HEIGHT;
    }

    /// Set the height directly, clamped to the allowed range.
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height.clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT);
    }
}

/// A structural mutation that was applied to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutChange {
    RowAdded { row: RowId, index: usize },
    RowRemoved { row: RowId, index: usize },
    ColumnsSet { row: RowId, count: u32 },
    SelectorShown { row: RowId },
    RowMoved { row: RowId, from: usize, to: usize },
    ColumnMoved { row: RowId, column: ColumnId, from: usize, to: usize },
    RowHeightChanged { row: RowId, height: u8 },
    /// The whole tree was swapped out (load, new layout).
    Replaced { rows: usize },
}

/// The ordered sequence of rows that makes up a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    /// An empty layout with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// A layout holding a single row in selector state, as shown on a fresh
    /// page.
    #[must_use]
    pub fn with_selector_row() -> Self {
        Self { rows: vec![Row::selector()] }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in display order.
    #[must_use]
    pub fn row_order(&self) -> Vec<RowId> {
        self.rows.iter().map(Row::id).collect()
    }

    /// Column ids of one row in display order.
    #[must_use]
    pub fn column_order(&self, row: RowId) -> Option<Vec<ColumnId>> {
        self.row(row).map(|r| r.columns.iter().map(Column::id).collect())
    }

    /// Which row holds the given column, if any.
    #[must_use]
    pub fn row_of_column(&self, column: ColumnId) -> Option<RowId> {
        self.rows
            .iter()
            .find(|r| r.column_index(column).is_some())
            .map(Row::id)
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut Row, EditorError> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EditorError::RowNotFound(id))
    }

    fn require_index(&self, id: RowId) -> Result<usize, EditorError> {
        self.index_of(id).ok_or(EditorError::RowNotFound(id))
    }

    // --- Rows ---

    /// Insert a new selector-state row before or after `anchor`.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if `anchor` is not in the layout.
    pub fn add_row(&mut self, placement: Placement, anchor: RowId) -> Result<LayoutChange, EditorError> {
        let anchor_index = self.require_index(anchor)?;
        let index = match placement {
            Placement::Before => anchor_index,
            Placement::After => anchor_index + 1,
        };
        let row = Row::selector();
        let id = row.id;
        self.rows.insert(index, row);
        Ok(LayoutChange::RowAdded { row: id, index })
    }

    /// Append a new selector-state row at the bottom.
    pub fn push_row(&mut self) -> LayoutChange {
        let row = Row::selector();
        let id = row.id;
        self.rows.push(row);
        LayoutChange::RowAdded { row: id, index: self.rows.len() - 1 }
    }

    /// Remove a row. Refused (returns `None`) when it is the only row left,
    /// since a page always keeps at least one row.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if `id` is not in the layout.
    pub fn delete_row(&mut self, id: RowId) -> Result<Option<LayoutChange>, EditorError> {
        let index = self.require_index(id)?;
        if self.rows.len() <= 1 {
            return Ok(None);
        }
        self.rows.remove(index);
        Ok(Some(LayoutChange::RowRemoved { row: id, index }))
    }

    /// Move `moved` so it sits immediately before or after `target`.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if either row is missing.
    pub fn reorder_row(
        &mut self,
        moved: RowId,
        target: RowId,
        placement: Placement,
    ) -> Result<Option<LayoutChange>, EditorError> {
        let from = self.require_index(moved)?;
        let target_index = self.require_index(target)?;
        Ok(relocate(&mut self.rows, from, target_index, placement)
            .map(|to| LayoutChange::RowMoved { row: moved, from, to }))
    }

    // --- Columns ---

    /// Replace a row's columns with `count` fresh slots.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColumnCount` if `count` is not one of `options`, or
    /// `RowNotFound` if the row is missing.
    pub fn set_column_count(
        &mut self,
        id: RowId,
        count: u32,
        options: &ColumnOptions,
    ) -> Result<LayoutChange, EditorError> {
        if !options.contains(count) {
            return Err(EditorError::InvalidColumnCount(count));
        }
        let row = self.row_mut(id)?;
        row.fill(count);
        Ok(LayoutChange::ColumnsSet { row: id, count })
    }

    /// Reopen the column-count picker for a populated row. The previous
    /// count is remembered for highlighting. `None` if the picker is
    /// already showing.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if the row is missing.
    pub fn show_selector(&mut self, id: RowId) -> Result<Option<LayoutChange>, EditorError> {
        let row = self.row_mut(id)?;
        if row.is_selector() {
            return Ok(None);
        }
        row.open_selector();
        Ok(Some(LayoutChange::SelectorShown { row: id }))
    }

    /// Move a column within its own row.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if the row is missing, or `ColumnNotFound` if
    /// either column does not belong to that row.
    pub fn reorder_column(
        &mut self,
        row: RowId,
        moved: ColumnId,
        target: ColumnId,
        placement: Placement,
    ) -> Result<Option<LayoutChange>, EditorError> {
        let r = self.row_mut(row)?;
        let from = r
            .column_index(moved)
            .ok_or(EditorError::ColumnNotFound { row, column: moved })?;
        let target_index = r
            .column_index(target)
            .ok_or(EditorError::ColumnNotFound { row, column: target })?;
        Ok(relocate(&mut r.columns, from, target_index, placement)
            .map(|to| LayoutChange::ColumnMoved { row, column: moved, from, to }))
    }

    // --- Height ---

    /// Grow or shrink a row by `delta` steps, clamped to the allowed range.
    /// `None` if the clamp left the height unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` if the row is missing.
    pub fn set_row_height(&mut self, id: RowId, delta: i8) -> Result<Option<LayoutChange>, EditorError> {
        let row = self.row_mut(id)?;
        let before = row.height;
        let next = i16::from(before) + i16::from(delta);
        let clamped = next.clamp(i16::from(MIN_ROW_HEIGHT), i16::from(MAX_ROW_HEIGHT));
        row.height = u8::try_from(clamped).unwrap_or(DEFAULT_ROW_HEIGHT);
        if row.height == before {
            return Ok(None);
        }
        Ok(Some(LayoutChange::RowHeightChanged { row: id, height: row.height }))
    }

    // --- Wholesale ---

    /// Swap in a different set of rows.
    pub fn replace(&mut self, other: Layout) -> LayoutChange {
        self.rows = other.rows;
        LayoutChange::Replaced { rows: self.rows.len() }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }
}

/// Move `items[from]` next to `items[target]`. Returns the final index, or
/// `None` if the sequence ended up in the same order.
fn relocate<T>(items: &mut Vec<T>, from: usize, target: usize, placement: Placement) -> Option<usize> {
    if from == target {
        return None;
    }
    let item = items.remove(from);
    let target = if target > from { target - 1 } else { target };
    let to = match placement {
        Placement::Before => target,
        Placement::After => target + 1,
    };
    items.insert(to, item);
    (to != from).then_some(to)
}
