//! Persisted layout document: encoding the tree to JSON and rebuilding it.
//!
//! The stored shape is an array with one entry per row in display order:
//!
//! ```json
//! [{"columns":2},{"columns":1,"height":5}]
//! ```
//!
//! Column slots hold no content, so a row is fully described by its column
//! count. `height` is optional and only written for populated rows whose
//! multiplier differs from the default; documents that never used height
//! therefore survive a decode/encode cycle unchanged.
//!
//! Decoding is lenient. The only hard requirement is that the text is a
//! JSON array. An entry whose `columns` is missing, negative, or not an
//! integer becomes a selector row.

#[cfg(test)]
#[path = "serial_test.rs"]
mod serial_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{DEFAULT_ROW_HEIGHT, MAX_COLUMNS_PER_ROW, MAX_ROW_HEIGHT};
use crate::doc::{Layout, Row};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid layout data: {0}")]
    InvalidLayoutData(String),
    #[error("row {index} asks for {columns} columns (max {max})", max = MAX_COLUMNS_PER_ROW)]
    TooManyColumns { index: usize, columns: u64 },
}

/// One row of the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEntry {
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u8>,
}

impl RowEntry {
    #[must_use]
    pub fn columns(columns: u32) -> Self {
        Self { columns, height: None }
    }
}

/// The persisted layout document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutDocument(pub Vec<RowEntry>);

impl LayoutDocument {
    /// Compact JSON text, the form written to the store.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures (none are expected for this shape).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored text. Anything that is not a JSON array is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayoutData` for malformed JSON or a non-array value,
    /// and `TooManyColumns` for an entry beyond the per-row cap.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DecodeError::InvalidLayoutData(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Interpret an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutDocument::from_json`].
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let Some(items) = value.as_array() else {
            return Err(DecodeError::InvalidLayoutData("expected an array of rows".into()));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| entry_from_value(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn entry_from_value(index: usize, item: &Value) -> Result<RowEntry, DecodeError> {
    let columns = item.get("columns").and_then(Value::as_u64).unwrap_or(0);
    if columns > u64::from(MAX_COLUMNS_PER_ROW) {
        return Err(DecodeError::TooManyColumns { index, columns });
    }
    let columns = u32::try_from(columns).unwrap_or(0);
    let height = item
        .get("height")
        .and_then(Value::as_u64)
        .map(|h| u8::try_from(h.min(u64::from(MAX_ROW_HEIGHT))).unwrap_or(MAX_ROW_HEIGHT));
    Ok(RowEntry { columns, height })
}

/// Encode the tree, one entry per row in display order.
#[must_use]
pub fn serialize(layout: &Layout) -> LayoutDocument {
    LayoutDocument(layout.rows().iter().map(entry_for_row).collect())
}

fn entry_for_row(row: &Row) -> RowEntry {
    let height = (!row.is_selector() && row.height() != DEFAULT_ROW_HEIGHT).then_some(row.height());
    RowEntry { columns: row.column_count(), height }
}

/// Rebuild a tree by appending one row per entry and replaying its column
/// count. An empty document yields an empty layout; seeding a placeholder
/// row is the caller's call.
///
/// # Errors
///
/// Returns `TooManyColumns` for an entry beyond the per-row cap.
pub fn deserialize(doc: &LayoutDocument) -> Result<Layout, DecodeError> {
    let mut layout = Layout::new();
    for (index, entry) in doc.0.iter().enumerate() {
        if entry.columns > MAX_COLUMNS_PER_ROW {
            return Err(DecodeError::TooManyColumns { index, columns: u64::from(entry.columns) });
        }
        layout.push_row();
        if let Some(row) = layout.rows_mut().last_mut() {
            if entry.columns > 0 {
                row.fill(entry.columns);
                if let Some(height) = entry.height {
                    row.set_height(height);
                }
            }
        }
    }
    Ok(layout)
}
