//! Row/column page-layout editor.
//!
//! A page is a vertical stack of rows, each split into empty column slots.
//! This crate owns the editing model end to end: the tree itself, drag and
//! drop reordering, the column-count selector, studio/view mode, the JSON
//! document the layout is persisted as, and autosave to a layout store. The
//! host UI is responsible only for wiring pointer and click events to the
//! engine and rendering what [`engine::EditorCore::render`] describes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorCore`] gesture entry points and host [`engine::Action`]s |
//! | [`doc`] | Rows, columns, and the ordered [`doc::Layout`] |
//! | [`drag`] | Drag state machine and live-preview reordering |
//! | [`selector`] | Render model for the selector, columns, and row controls |
//! | [`serial`] | Persisted JSON document |
//! | [`autosave`] | Change observers and autosave |
//! | [`mode`] | Studio / view mode |
//! | [`store`] | Layout store client (HTTP and in-memory) |
//! | [`studio`] | Async session tying the editor to a store |
//! | [`geom`] | Pointer and bounding-box geometry |
//! | [`config`] | Column options and feature switches |
//! | [`consts`] | Shared numeric constants (height bounds, option sets, etc.) |

pub mod autosave;
pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geom;
pub mod mode;
pub mod selector;
pub mod serial;
pub mod store;
pub mod studio;

pub use error::EditorError;
