//! Errors raised by editing gestures.

use crate::doc::{ColumnId, RowId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("row not found: {0}")]
    RowNotFound(RowId),
    #[error("column {column} not found in row {row}")]
    ColumnNotFound { row: RowId, column: ColumnId },
    #[error("column count {0} is not offered by the selector")]
    InvalidColumnCount(u32),
    #[error("layout is read-only in view mode")]
    ReadOnly,
}
