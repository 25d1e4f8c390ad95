//! Mock storage implementation for testing.
//!
//! Provides [`MockPageStore`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::id::is_valid;
use crate::store::{PageStore, StorageError, StorageErrorKind};
use crate::{Page, PageId};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock page store for testing.
///
/// Stores pages in memory and counts every call so tests can assert the
/// store was never reached. Use the builder methods to configure the mock
/// with test data or to make operations fail.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockPageStore, Page, PageId, PageStore};
///
/// let store = MockPageStore::new().with_page(Page {
///     path: "home".to_owned(),
///     title: "Home".to_owned(),
///     ..Page::default()
/// });
///
/// let page = store.load(&PageId::parse("home").unwrap()).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockPageStore {
    pages: RwLock<BTreeMap<String, Page>>,
    fail_writes: bool,
    fail_list: bool,
    calls: AtomicUsize,
}

impl MockPageStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page keyed by its `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().insert(page.path.clone(), page);
        self
    }

    /// Make every `save` fail with a permission error.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Make every `list` fail with a permission error.
    #[must_use]
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Get a stored page without counting it as a store call.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<Page> {
        self.pages.read().unwrap().get(id).cloned()
    }

    /// Number of `load`, `save` and `list` calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn permission_denied(what: &str) -> StorageError {
        StorageError::new(StorageErrorKind::PermissionDenied)
            .with_backend(BACKEND)
            .with_source(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{what} refused by mock"),
            ))
    }
}

impl PageStore for MockPageStore {
    fn load(&self, id: &PageId) -> Result<Page, StorageError> {
        self.record_call();
        self.pages
            .read()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StorageError::not_found(id.as_str()).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        self.record_call();
        if !is_valid(&page.path) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(&page.path)
                .with_backend(BACKEND));
        }
        if self.fail_writes {
            return Err(Self::permission_denied("write"));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.path.clone(), page.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        self.record_call();
        if self.fail_list {
            return Err(Self::permission_denied("list"));
        }
        Ok(self.pages.read().unwrap().keys().cloned().collect())
    }
}
