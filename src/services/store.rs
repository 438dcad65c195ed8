//! Layout store service: named layout documents kept as files.
//!
//! DESIGN
//! ======
//! Each layout is one file, `<dir>/layout-<name>.json`, holding the document
//! text exactly as the editor sent it. The store never parses documents.
//! Names are sanitized to `[A-Za-z0-9_-]` with the same rule the editor
//! client uses, so a name can never escape the directory. The listing is
//! derived from file names alone.
//!
//! ERROR HANDLING
//! ==============
//! A name that sanitizes to nothing is `MissingNameOrData` on save and
//! `NotFound` on load. A missing directory is an empty listing; it is
//! created on the first save.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use editor::consts::{MISSING_NAME_OR_DATA_MESSAGE, NOT_FOUND_MESSAGE};
use editor::store::sanitize_layout_name;
use tracing::debug;

const FILE_PREFIX: &str = "layout-";
const FILE_SUFFIX: &str = ".json";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{msg}", msg = MISSING_NAME_OR_DATA_MESSAGE)]
    MissingNameOrData,
    #[error("{msg}", msg = NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("layout file I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    dir: PathBuf,
}

// =============================================================================
// STORE
// =============================================================================

impl FileLayoutStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// File backing `name`, or `None` if nothing survives sanitizing.
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        let name = sanitize_layout_name(name);
        if name.is_empty() {
            return None;
        }
        Some(self.dir.join(format!("{FILE_PREFIX}{name}{FILE_SUFFIX}")))
    }

    /// Names of every stored layout, sorted.
    ///
    /// # Errors
    ///
    /// `Io` if the directory exists but cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_prefix(FILE_PREFIX))
                .and_then(|f| f.strip_suffix(FILE_SUFFIX))
            else {
                continue;
            };
            if !name.is_empty() {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Replace the document stored under `name`.
    ///
    /// # Errors
    ///
    /// `MissingNameOrData` for an empty sanitized name or empty data, `Io`
    /// if the file cannot be written.
    pub async fn save(&self, name: &str, data: &str) -> Result<(), StoreError> {
        let Some(path) = self.path_for(name) else {
            return Err(StoreError::MissingNameOrData);
        };
        if data.is_empty() {
            return Err(StoreError::MissingNameOrData);
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, data).await?;
        debug!(path = %path.display(), bytes = data.len(), "layout file written");
        Ok(())
    }

    /// Stored text for `name`, verbatim.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such layout exists, `Io` if it cannot be read.
    pub async fn load(&self, name: &str) -> Result<String, StoreError> {
        let Some(path) = self.path_for(name) else {
            return Err(StoreError::NotFound);
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
