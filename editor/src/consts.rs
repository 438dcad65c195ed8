//! Shared numeric constants for the editor crate.

// ── Row height ──────────────────────────────────────────────────

/// Smallest row height multiplier. Rows in selector state sit here.
pub const MIN_ROW_HEIGHT: u8 = 1;

/// Largest row height multiplier.
pub const MAX_ROW_HEIGHT: u8 = 6;

/// Height multiplier given to a row when it leaves selector state.
pub const DEFAULT_ROW_HEIGHT: u8 = 3;

// ── Columns ─────────────────────────────────────────────────────

/// Column-count choices offered by the default selector.
pub const STANDARD_COLUMN_OPTIONS: [u32; 4] = [1, 2, 3, 4];

/// Column-count choices offered by the wide-grid selector.
pub const EXTENDED_COLUMN_OPTIONS: [u32; 6] = [1, 2, 3, 4, 6, 8];

/// Upper bound on columns accepted from a decoded document.
pub const MAX_COLUMNS_PER_ROW: u32 = 64;

// ── Persistence ─────────────────────────────────────────────────

/// Error text the store returns for an unknown layout name.
pub const NOT_FOUND_MESSAGE: &str = "File not found";

/// Error text the store returns when a save omits the name or body.
pub const MISSING_NAME_OR_DATA_MESSAGE: &str = "Missing name or data";
