use super::*;
use crate::config::ColumnOptions;
use crate::doc::LayoutChange;

fn roundtrip_text(text: &str) -> String {
    let doc = LayoutDocument::from_json(text).unwrap();
    let layout = deserialize(&doc).unwrap();
    serialize(&layout).to_json().unwrap()
}

// =============================================================
// Encoding
// =============================================================

#[test]
fn serialize_empty_layout_is_empty_array() {
    assert_eq!(serialize(&Layout::new()).to_json().unwrap(), "[]");
}

#[test]
fn serialize_selector_row_has_zero_columns() {
    let doc = serialize(&Layout::with_selector_row());
    assert_eq!(doc.to_json().unwrap(), r#"[{"columns":0}]"#);
}

#[test]
fn serialize_writes_rows_in_display_order() {
    let options = ColumnOptions::standard();
    let mut layout = Layout::with_selector_row();
    let first = layout.rows()[0].id();
    layout.set_column_count(first, 3, &options).unwrap();
    let LayoutChange::RowAdded { row: second, .. } = layout.add_row(crate::geom::Placement::Before, first).unwrap() else {
        panic!("expected RowAdded");
    };
    layout.set_column_count(second, 1, &options).unwrap();
    assert_eq!(serialize(&layout).to_json().unwrap(), r#"[{"columns":1},{"columns":3}]"#);
}

#[test]
fn serialize_omits_default_height() {
    let options = ColumnOptions::standard();
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    layout.set_column_count(id, 2, &options).unwrap();
    assert_eq!(serialize(&layout).0, vec![RowEntry::columns(2)]);
}

#[test]
fn serialize_writes_non_default_height() {
    let options = ColumnOptions::standard();
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    layout.set_column_count(id, 2, &options).unwrap();
    layout.set_row_height(id, 2).unwrap();
    assert_eq!(serialize(&layout).to_json().unwrap(), r#"[{"columns":2,"height":5}]"#);
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn deserialize_replays_column_counts() {
    let doc = LayoutDocument(vec![RowEntry::columns(2), RowEntry::columns(1)]);
    let layout = deserialize(&doc).unwrap();
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.rows()[0].column_count(), 2);
    assert_eq!(layout.rows()[1].column_count(), 1);
}

#[test]
fn deserialize_zero_columns_is_selector_row() {
    let layout = deserialize(&LayoutDocument(vec![RowEntry::columns(0)])).unwrap();
    assert!(layout.rows()[0].is_selector());
}

#[test]
fn deserialize_empty_document_is_empty_layout() {
    let layout = deserialize(&LayoutDocument::default()).unwrap();
    assert!(layout.is_empty());
}

#[test]
fn deserialize_applies_height() {
    let doc = LayoutDocument(vec![RowEntry { columns: 4, height: Some(6) }]);
    let layout = deserialize(&doc).unwrap();
    assert_eq!(layout.rows()[0].height(), 6);
}

#[test]
fn deserialize_ignores_height_on_selector_rows() {
    let doc = LayoutDocument(vec![RowEntry { columns: 0, height: Some(5) }]);
    let layout = deserialize(&doc).unwrap();
    assert_eq!(layout.rows()[0].height(), crate::consts::MIN_ROW_HEIGHT);
}

#[test]
fn deserialize_rejects_too_many_columns() {
    let doc = LayoutDocument(vec![RowEntry::columns(MAX_COLUMNS_PER_ROW + 1)]);
    assert!(matches!(deserialize(&doc), Err(DecodeError::TooManyColumns { index: 0, .. })));
}

#[test]
fn from_json_rejects_non_array() {
    let err = LayoutDocument::from_json(r#"{"success":false,"error":"File not found"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidLayoutData(_)));
}

#[test]
fn from_json_rejects_malformed_text() {
    assert!(matches!(LayoutDocument::from_json("[{"), Err(DecodeError::InvalidLayoutData(_))));
}

#[test]
fn from_json_treats_odd_entries_as_selector_rows() {
    let doc = LayoutDocument::from_json(r#"[{"columns":"3"},{},42,{"columns":-1},{"columns":2.5}]"#).unwrap();
    assert_eq!(doc.len(), 5);
    assert!(doc.0.iter().all(|e| e.columns == 0));
}

#[test]
fn from_json_clamps_large_height() {
    let doc = LayoutDocument::from_json(r#"[{"columns":1,"height":900}]"#).unwrap();
    assert_eq!(doc.0[0].height, Some(crate::consts::MAX_ROW_HEIGHT));
}

#[test]
fn from_json_rejects_oversized_row() {
    let err = LayoutDocument::from_json(r#"[{"columns":1},{"columns":1000000000}]"#).unwrap_err();
    assert!(matches!(err, DecodeError::TooManyColumns { index: 1, columns: 1_000_000_000 }));
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn roundtrip_preserves_documents() {
    let cases = [
        "[]",
        r#"[{"columns":3}]"#,
        r#"[{"columns":2},{"columns":1}]"#,
        r#"[{"columns":0},{"columns":4},{"columns":0}]"#,
        r#"[{"columns":6},{"columns":8}]"#,
        r#"[{"columns":2,"height":1},{"columns":1,"height":6}]"#,
    ];
    for case in cases {
        assert_eq!(roundtrip_text(case), case, "round trip of {case}");
    }
}

#[test]
fn roundtrip_normalizes_default_height() {
    assert_eq!(roundtrip_text(r#"[{"columns":2,"height":3}]"#), r#"[{"columns":2}]"#);
}
