//! Page record.

use serde::{Deserialize, Serialize};

use crate::PageId;

/// A wiki page as stored on disk and handed to templates.
///
/// Field names are serialized in `PascalCase` (`Path`, `Title`, `Body`,
/// `Footer`), both in stored records and in template contexts. Fields
/// missing from a stored record read back as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Page {
    /// Page identifier, also the storage key.
    pub path: String,
    /// Display title.
    pub title: String,
    /// Freeform body text.
    pub body: String,
    /// Freeform footer text.
    pub footer: String,
}

impl Page {
    /// Create an empty page whose path and title are the identifier.
    ///
    /// Used as the starting point of the creation form for a page that
    /// does not exist yet.
    #[must_use]
    pub fn blank(id: &PageId) -> Self {
        Self {
            path: id.to_string(),
            title: id.to_string(),
            body: String::new(),
            footer: String::new(),
        }
    }
}
