//! Page storage for the flat-file wiki.
//!
//! This crate provides a [`PageStore`] trait that hides where page records
//! live. Handlers only ever talk to the trait, which keeps them testable
//! without touching the real filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`] record and the validated [`PageId`] identifier
//! - [`PageStore`] trait with `load()`, `save()`, and `list()` methods
//! - [`FsPageStore`] storing one JSON file per page under a data directory
//! - [`MockPageStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::{FsPageStore, Page, PageId, PageStore};
//!
//! let store = FsPageStore::new(PathBuf::from("data"));
//! let id = PageId::parse("FrontPage").unwrap();
//! store.save(&Page::blank(&id))?;
//! let page = store.load(&id)?;
//! ```

mod fs;
mod id;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod store;

pub use fs::{FsPageStore, RECORD_EXTENSION};
pub use id::PageId;
#[cfg(feature = "mock")]
pub use mock::MockPageStore;
pub use page::Page;
pub use store::{PageStore, StorageError, StorageErrorKind};
