//! Render model for rows: the column-count selector, populated columns, and
//! the per-row controls around them.
//!
//! DESIGN
//! ======
//! The host renders exactly what this module describes and nothing else.
//! A row is in one of two mutually exclusive states: `Selector` (no columns
//! yet, the picker is showing) or `Populated`. Going back from populated to
//! the selector only happens through the explicit "change layout" control,
//! and the picker then highlights the previously chosen count.
//!
//! Control visibility rules:
//! - delete and row drag handle only appear when more than one row exists
//! - a column drag handle only appears when its row has more than one column
//! - in view mode every editing control is hidden

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use crate::config::{ColumnOptions, EditorConfig};
use crate::consts::{MAX_ROW_HEIGHT, MIN_ROW_HEIGHT};
use crate::doc::{ColumnId, Layout, Row, RowId};
use crate::drag::{DragController, DropTarget};
use crate::mode::Mode;

/// One choice in the column-count picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub count: u32,
    pub label: String,
    /// The count this row had before the picker was reopened.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub drag_handle: bool,
    pub drop_target: bool,
    /// A column from another row is being dragged.
    pub not_allowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightControls {
    pub value: u8,
    pub can_grow: bool,
    pub can_shrink: bool,
}

/// The body of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    Selector {
        options: Vec<SelectorOption>,
    },
    Populated {
        columns: Vec<ColumnView>,
        change_layout: bool,
        height: Option<HeightControls>,
    },
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowControls {
    pub add_above: bool,
    pub add_below: bool,
    pub delete: bool,
    pub drag_handle: bool,
    pub drop_target: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRender {
    pub id: RowId,
    pub controls: RowControls,
    pub body: RowView,
}

/// Picker label for a count: "1 column", "3 columns".
#[must_use]
pub fn option_label(count: u32) -> String {
    if count == 1 { "1 column".to_owned() } else { format!("{count} columns") }
}

/// Picker entries in display order, marking the row's previous count.
#[must_use]
pub fn selector_options(options: &ColumnOptions, last_count: u32) -> Vec<SelectorOption> {
    options
        .as_slice()
        .iter()
        .map(|&count| SelectorOption { count, label: option_label(count), selected: count == last_count })
        .collect()
}

/// Describe every row in display order.
#[must_use]
pub fn render(layout: &Layout, config: &EditorConfig, mode: Mode, drag: &DragController) -> Vec<RowRender> {
    layout
        .rows()
        .iter()
        .map(|row| render_row(row, layout.len(), config, mode, drag))
        .collect()
}

/// Describe a single row. `row_total` is the number of rows on the page.
#[must_use]
pub fn render_row(row: &Row, row_total: usize, config: &EditorConfig, mode: Mode, drag: &DragController) -> RowRender {
    let affordances = mode.affordances();
    let many_rows = row_total > 1;
    let controls = RowControls {
        add_above: affordances.add_row,
        add_below: affordances.add_row,
        delete: affordances.delete_row && many_rows,
        drag_handle: affordances.drag_handles && many_rows,
        drop_target: drag.drop_target() == Some(DropTarget::Row(row.id())),
        dragging: drag.dragged_row() == Some(row.id()),
    };

    let body = if row.is_selector() {
        let options = if affordances.change_layout {
            selector_options(&config.column_options, row.last_count())
        } else {
            Vec::new()
        };
        RowView::Selector { options }
    } else {
        let not_allowed = drag.is_not_allowed(row.id());
        let column_handles = affordances.drag_handles && row.column_count() > 1;
        let columns = row
            .columns()
            .iter()
            .map(|c| ColumnView {
                id: c.id(),
                drag_handle: column_handles,
                drop_target: drag.drop_target() == Some(DropTarget::Column(c.id())),
                not_allowed,
            })
            .collect();
        let height = (config.height_enabled && affordances.row_height).then(|| HeightControls {
            value: row.height(),
            can_grow: row.height() < MAX_ROW_HEIGHT,
            can_shrink: row.height() > MIN_ROW_HEIGHT,
        });
        RowView::Populated { columns, change_layout: affordances.change_layout, height }
    };

    RowRender { id: row.id(), controls, body }
}
