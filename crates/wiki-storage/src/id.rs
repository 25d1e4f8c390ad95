//! Page identifiers.
//!
//! A [`PageId`] is the alphanumeric token taken from a page URL. It doubles
//! as the storage key, so it must never contain anything that could change
//! the meaning of a filesystem path.

use std::fmt;

/// Validated page identifier.
///
/// Holds one or more ASCII letters or digits and nothing else. The value is
/// kept exactly as given: no case folding, no length cap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Parse an identifier, returning `None` if it is empty or contains any
    /// character outside `[a-zA-Z0-9]`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        is_valid(raw).then(|| Self(raw.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check the identifier character class.
///
/// Uses the ASCII class on purpose: `char::is_alphanumeric` would accept
/// unicode letters and digits.
pub(crate) fn is_valid(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
