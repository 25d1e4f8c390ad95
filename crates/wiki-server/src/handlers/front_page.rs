//! Front page listing all stored pages.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /.
///
/// A listing failure is reported as a 500 and nothing is rendered.
pub(crate) async fn get_front_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let pages = state.store.list()?;
    tracing::debug!(count = pages.len(), "Listing pages");
    Ok(Html(state.templates.render_front_page(&pages)?))
}
