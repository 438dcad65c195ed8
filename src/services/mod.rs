//! Domain services used by HTTP routes.
//!
//! Services own persistence so route handlers stay focused on wire-format
//! translation.

pub mod store;
