use super::*;

// =============================================================
// Helpers
// =============================================================

fn layout_with(counts: &[u32]) -> Layout {
    let options = ColumnOptions::extended();
    let mut layout = Layout::new();
    for &count in counts {
        let LayoutChange::RowAdded { row, .. } = layout.push_row() else {
            unreachable!("push_row always adds");
        };
        if count > 0 {
            layout.set_column_count(row, count, &options).unwrap();
        }
    }
    layout
}

fn counts(layout: &Layout) -> Vec<u32> {
    layout.rows().iter().map(Row::column_count).collect()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_layout_is_empty() {
    let layout = Layout::new();
    assert!(layout.is_empty());
    assert_eq!(layout.len(), 0);
}

#[test]
fn with_selector_row_has_one_selector_row() {
    let layout = Layout::with_selector_row();
    assert_eq!(layout.len(), 1);
    let row = &layout.rows()[0];
    assert!(row.is_selector());
    assert_eq!(row.column_count(), 0);
    assert_eq!(row.last_count(), 0);
    assert_eq!(row.height(), MIN_ROW_HEIGHT);
}

#[test]
fn row_ids_are_unique() {
    let a = RowId::new();
    let b = RowId::new();
    assert_ne!(a, b);
}

// =============================================================
// add_row
// =============================================================

#[test]
fn add_row_before_anchor() {
    let mut layout = layout_with(&[1, 2]);
    let anchor = layout.rows()[1].id();
    let change = layout.add_row(Placement::Before, anchor).unwrap();
    let LayoutChange::RowAdded { row, index } = change else {
        panic!("expected RowAdded, got {change:?}");
    };
    assert_eq!(index, 1);
    assert_eq!(layout.index_of(row), Some(1));
    assert_eq!(counts(&layout), vec![1, 0, 2]);
}

#[test]
fn add_row_after_anchor() {
    let mut layout = layout_with(&[1, 2]);
    let anchor = layout.rows()[1].id();
    let change = layout.add_row(Placement::After, anchor).unwrap();
    assert!(matches!(change, LayoutChange::RowAdded { index: 2, .. }));
    assert_eq!(counts(&layout), vec![1, 2, 0]);
}

#[test]
fn add_row_new_row_is_in_selector_state() {
    let mut layout = Layout::with_selector_row();
    let anchor = layout.rows()[0].id();
    layout.add_row(Placement::After, anchor).unwrap();
    assert!(layout.rows()[1].is_selector());
}

#[test]
fn add_row_unknown_anchor_errors() {
    let mut layout = Layout::with_selector_row();
    let ghost = RowId::new();
    assert_eq!(layout.add_row(Placement::After, ghost), Err(EditorError::RowNotFound(ghost)));
    assert_eq!(layout.len(), 1);
}

// =============================================================
// delete_row
// =============================================================

#[test]
fn delete_row_removes_it() {
    let mut layout = layout_with(&[1, 2, 3]);
    let id = layout.rows()[1].id();
    let change = layout.delete_row(id).unwrap();
    assert_eq!(change, Some(LayoutChange::RowRemoved { row: id, index: 1 }));
    assert_eq!(counts(&layout), vec![1, 3]);
}

#[test]
fn delete_last_row_is_refused() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    assert_eq!(layout.delete_row(id).unwrap(), None);
    assert_eq!(layout.len(), 1);
}

#[test]
fn delete_never_drops_below_one_row() {
    let mut layout = layout_with(&[1, 2, 3, 4]);
    for _ in 0..10 {
        let id = layout.rows()[0].id();
        layout.delete_row(id).unwrap();
    }
    assert_eq!(layout.len(), 1);
}

#[test]
fn delete_unknown_row_errors() {
    let mut layout = layout_with(&[1, 2]);
    let ghost = RowId::new();
    assert_eq!(layout.delete_row(ghost), Err(EditorError::RowNotFound(ghost)));
}

// =============================================================
// set_column_count / show_selector
// =============================================================

#[test]
fn set_column_count_creates_that_many_columns() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    let change = layout.set_column_count(id, 3, &ColumnOptions::standard()).unwrap();
    assert_eq!(change, LayoutChange::ColumnsSet { row: id, count: 3 });
    let row = layout.row(id).unwrap();
    assert_eq!(row.column_count(), 3);
    assert_eq!(row.columns().len(), 3);
    assert_eq!(row.last_count(), 3);
}

#[test]
fn set_column_count_rejects_counts_outside_options() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    let err = layout.set_column_count(id, 6, &ColumnOptions::standard()).unwrap_err();
    assert_eq!(err, EditorError::InvalidColumnCount(6));
    assert!(layout.row(id).unwrap().is_selector());
}

#[test]
fn set_column_count_zero_is_rejected() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    assert!(layout.set_column_count(id, 0, &ColumnOptions::extended()).is_err());
}

#[test]
fn extended_options_allow_eight_columns() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    layout.set_column_count(id, 8, &ColumnOptions::extended()).unwrap();
    assert_eq!(layout.row(id).unwrap().column_count(), 8);
}

#[test]
fn set_column_count_mints_fresh_columns() {
    let mut layout = layout_with(&[2]);
    let id = layout.rows()[0].id();
    let before = layout.column_order(id).unwrap();
    layout.set_column_count(id, 2, &ColumnOptions::standard()).unwrap();
    let after = layout.column_order(id).unwrap();
    assert!(before.iter().all(|c| !after.contains(c)));
}

#[test]
fn leaving_selector_resets_height_to_default() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    assert_eq!(layout.row(id).unwrap().height(), MIN_ROW_HEIGHT);
    layout.set_column_count(id, 2, &ColumnOptions::standard()).unwrap();
    assert_eq!(layout.row(id).unwrap().height(), DEFAULT_ROW_HEIGHT);
}

#[test]
fn changing_count_on_populated_row_keeps_height() {
    let mut layout = layout_with(&[2]);
    let id = layout.rows()[0].id();
    layout.set_row_height(id, 2).unwrap();
    layout.set_column_count(id, 4, &ColumnOptions::standard()).unwrap();
    assert_eq!(layout.row(id).unwrap().height(), DEFAULT_ROW_HEIGHT + 2);
}

#[test]
fn show_selector_clears_columns_but_remembers_count() {
    let mut layout = layout_with(&[3]);
    let id = layout.rows()[0].id();
    let change = layout.show_selector(id).unwrap();
    assert_eq!(change, Some(LayoutChange::SelectorShown { row: id }));
    let row = layout.row(id).unwrap();
    assert!(row.is_selector());
    assert_eq!(row.column_count(), 0);
    assert_eq!(row.last_count(), 3);
    assert_eq!(row.height(), MIN_ROW_HEIGHT);
}

#[test]
fn show_selector_on_selector_row_is_noop() {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    assert_eq!(layout.show_selector(id).unwrap(), None);
}

// =============================================================
// reorder_row
// =============================================================

#[test]
fn reorder_row_before_target() {
    let mut layout = layout_with(&[1, 2, 3]);
    let ids = layout.row_order();
    let change = layout.reorder_row(ids[2], ids[0], Placement::Before).unwrap();
    assert_eq!(change, Some(LayoutChange::RowMoved { row: ids[2], from: 2, to: 0 }));
    assert_eq!(layout.row_order(), vec![ids[2], ids[0], ids[1]]);
}

#[test]
fn reorder_row_after_target() {
    let mut layout = layout_with(&[1, 2, 3]);
    let ids = layout.row_order();
    layout.reorder_row(ids[0], ids[1], Placement::After).unwrap();
    assert_eq!(layout.row_order(), vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn reorder_row_after_last() {
    let mut layout = layout_with(&[1, 2, 3]);
    let ids = layout.row_order();
    layout.reorder_row(ids[0], ids[2], Placement::After).unwrap();
    assert_eq!(layout.row_order(), vec![ids[1], ids[2], ids[0]]);
}

#[test]
fn reorder_row_onto_itself_is_noop() {
    let mut layout = layout_with(&[1, 2]);
    let ids = layout.row_order();
    assert_eq!(layout.reorder_row(ids[0], ids[0], Placement::After).unwrap(), None);
    assert_eq!(layout.row_order(), ids);
}

#[test]
fn reorder_row_into_current_slot_is_noop() {
    let mut layout = layout_with(&[1, 2, 3]);
    let ids = layout.row_order();
    // Already immediately before ids[1] and immediately after ids[0].
    assert_eq!(layout.reorder_row(ids[1], ids[2], Placement::Before).unwrap(), None);
    assert_eq!(layout.reorder_row(ids[1], ids[0], Placement::After).unwrap(), None);
    assert_eq!(layout.row_order(), ids);
}

#[test]
fn reorder_row_unknown_errors() {
    let mut layout = layout_with(&[1, 2]);
    let ids = layout.row_order();
    let ghost = RowId::new();
    assert_eq!(layout.reorder_row(ghost, ids[0], Placement::Before), Err(EditorError::RowNotFound(ghost)));
    assert_eq!(layout.reorder_row(ids[0], ghost, Placement::Before), Err(EditorError::RowNotFound(ghost)));
}

// =============================================================
// reorder_column
// =============================================================

#[test]
fn reorder_column_within_row() {
    let mut layout = layout_with(&[3]);
    let row = layout.rows()[0].id();
    let cols = layout.column_order(row).unwrap();
    let change = layout.reorder_column(row, cols[0], cols[2], Placement::After).unwrap();
    assert_eq!(change, Some(LayoutChange::ColumnMoved { row, column: cols[0], from: 0, to: 2 }));
    assert_eq!(layout.column_order(row).unwrap(), vec![cols[1], cols[2], cols[0]]);
}

#[test]
fn reorder_column_from_other_row_errors() {
    let mut layout = layout_with(&[2, 2]);
    let a = layout.rows()[0].id();
    let b = layout.rows()[1].id();
    let a_cols = layout.column_order(a).unwrap();
    let b_cols = layout.column_order(b).unwrap();
    let err = layout.reorder_column(b, a_cols[0], b_cols[0], Placement::Before).unwrap_err();
    assert_eq!(err, EditorError::ColumnNotFound { row: b, column: a_cols[0] });
    assert_eq!(layout.column_order(a).unwrap(), a_cols);
    assert_eq!(layout.column_order(b).unwrap(), b_cols);
}

#[test]
fn row_of_column_finds_owner() {
    let layout = layout_with(&[2, 3]);
    let b = layout.rows()[1].id();
    let col = layout.column_order(b).unwrap()[2];
    assert_eq!(layout.row_of_column(col), Some(b));
    assert_eq!(layout.row_of_column(ColumnId::new()), None);
}

// =============================================================
// set_row_height
// =============================================================

#[test]
fn row_height_grows_and_shrinks() {
    let mut layout = layout_with(&[1]);
    let id = layout.rows()[0].id();
    let change = layout.set_row_height(id, 1).unwrap();
    assert_eq!(change, Some(LayoutChange::RowHeightChanged { row: id, height: DEFAULT_ROW_HEIGHT + 1 }));
    layout.set_row_height(id, -1).unwrap();
    assert_eq!(layout.row(id).unwrap().height(), DEFAULT_ROW_HEIGHT);
}

#[test]
fn row_height_clamps_to_bounds() {
    let mut layout = layout_with(&[1]);
    let id = layout.rows()[0].id();
    for _ in 0..10 {
        layout.set_row_height(id, 1).unwrap();
    }
    assert_eq!(layout.row(id).unwrap().height(), MAX_ROW_HEIGHT);
    assert_eq!(layout.set_row_height(id, 1).unwrap(), None);
    for _ in 0..10 {
        layout.set_row_height(id, -1).unwrap();
    }
    assert_eq!(layout.row(id).unwrap().height(), MIN_ROW_HEIGHT);
    assert_eq!(layout.set_row_height(id, -1).unwrap(), None);
}

// =============================================================
// replace
// =============================================================

#[test]
fn replace_swaps_rows() {
    let mut layout = layout_with(&[1, 2, 3]);
    let change = layout.replace(Layout::with_selector_row());
    assert_eq!(change, LayoutChange::Replaced { rows: 1 });
    assert_eq!(layout.len(), 1);
}
