//! Editor configuration: which column counts the selector offers and whether
//! row height controls are enabled.

use crate::consts::{EXTENDED_COLUMN_OPTIONS, STANDARD_COLUMN_OPTIONS};

/// The set of column counts a row may be given from the selector, in the
/// order they are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOptions(Vec<u32>);

impl ColumnOptions {
    /// One to four columns.
    #[must_use]
    pub fn standard() -> Self {
        Self(STANDARD_COLUMN_OPTIONS.to_vec())
    }

    /// One to four, six, and eight columns.
    #[must_use]
    pub fn extended() -> Self {
        Self(EXTENDED_COLUMN_OPTIONS.to_vec())
    }

    /// A custom option set. Zero and duplicates are dropped; order is kept.
    #[must_use]
    pub fn custom(counts: impl IntoIterator<Item = u32>) -> Self {
        let mut out: Vec<u32> = Vec::new();
        for count in counts {
            if count > 0 && !out.contains(&count) {
                out.push(count);
            }
        }
        Self(out)
    }

    #[must_use]
    pub fn contains(&self, count: u32) -> bool {
        self.0.contains(&count)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub column_options: ColumnOptions,
    /// Show grow/shrink controls on populated rows.
    pub height_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { column_options: ColumnOptions::standard(), height_enabled: true }
    }
}
