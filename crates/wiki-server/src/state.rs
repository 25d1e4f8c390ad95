//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use wiki_storage::PageStore;

use crate::templates::Templates;

/// Application state shared across all handlers.
///
/// Built once at startup and never mutated afterwards.
pub(crate) struct AppState {
    /// Page storage backend.
    pub(crate) store: Arc<dyn PageStore>,
    /// Compiled template set.
    pub(crate) templates: Templates,
}
