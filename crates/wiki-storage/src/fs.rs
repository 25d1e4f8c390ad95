//! Filesystem storage implementation.
//!
//! Provides [`FsPageStore`], which keeps every page as a JSON record at
//! `<data_dir>/<id>.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::id::is_valid;
use crate::store::{PageStore, StorageError, StorageErrorKind};
use crate::{Page, PageId};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension of stored page records.
pub const RECORD_EXTENSION: &str = "json";

/// Filesystem page store.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use wiki_storage::{FsPageStore, PageStore};
///
/// let store = FsPageStore::new(PathBuf::from("data"));
/// store.ensure_data_dir()?;
/// let ids = store.list()?;
/// ```
#[derive(Debug)]
pub struct FsPageStore {
    /// Directory holding one record file per page.
    data_dir: PathBuf,
}

impl FsPageStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// The directory is not touched until the first operation; call
    /// [`FsPageStore::ensure_data_dir`] to create it up front.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding the page records.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory (and parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn ensure_data_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND)
        })
    }

    /// Resolve the record file for an identifier.
    fn record_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    /// Extract the identifier from a record file name, skipping anything that
    /// is not a page record.
    fn id_from_file_name(name: &str) -> Option<&str> {
        let stem = name.strip_suffix(RECORD_EXTENSION)?.strip_suffix('.')?;
        is_valid(stem).then_some(stem)
    }
}

impl PageStore for FsPageStore {
    fn load(&self, id: &PageId) -> Result<Page, StorageError> {
        let path = self.record_path(id.as_str());
        let content = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;

        let page = serde_json::from_slice(&content).map_err(|e| {
            tracing::debug!(id = %id, error = %e, "Stored record is not a valid page");
            StorageError::not_found(&path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        Ok(page)
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        if !is_valid(&page.path) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(&page.path)
                .with_backend(BACKEND));
        }

        let path = self.record_path(&page.path);
        let json = serde_json::to_vec(page).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(&path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        write_record(&path, &json)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;

        tracing::debug!(id = %page.path, path = %path.display(), "Page record written");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|e| {
            StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND)
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND)
            })?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(Self::id_from_file_name) {
                ids.push(id.to_owned());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

/// Write a record, truncating any previous content.
#[cfg(unix)]
fn write_record(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)
}

/// Write a record, truncating any previous content.
#[cfg(not(unix))]
fn write_record(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)
}
