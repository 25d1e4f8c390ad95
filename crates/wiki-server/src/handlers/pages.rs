//! Page view, edit, and save endpoints.
//!
//! All page URLs go through [`dispatch`], which validates the path with
//! [`Route::parse`] before any handler (and so any store call) runs.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{Html, IntoResponse, Response};
use wiki_storage::{Page, PageId};

use crate::error::ServerError;
use crate::handlers::found;
use crate::route::{Action, Route};
use crate::state::AppState;
use crate::templates;

/// Form fields submitted by the edit form.
///
/// Missing fields are empty strings; nothing is required.
#[derive(Debug, Default)]
struct SaveForm {
    title: String,
    body: String,
    footer: String,
}

impl SaveForm {
    /// Decode an urlencoded body. A repeated field keeps its first value.
    fn parse(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;

        let mut form = Self::default();
        for (key, value) in pairs.into_iter().rev() {
            match key.as_str() {
                "title" => form.title = value,
                "body" => form.body = value,
                "footer" => form.footer = value,
                _ => {}
            }
        }
        Ok(form)
    }
}

/// Route a page request to the view, edit, or save handler.
///
/// Anything that is not `GET|HEAD /view/<id>`, `GET|HEAD /edit/<id>` or
/// `POST /save/<id>` is a 404.
pub(crate) async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ServerError> {
    let Some(route) = Route::parse(uri.path()) else {
        tracing::debug!(path = uri.path(), "No route for path");
        return Err(ServerError::RouteNotFound);
    };

    match (route.action, &method) {
        (Action::View, &Method::GET | &Method::HEAD) => view_page(&state, &route.id),
        (Action::Edit, &Method::GET | &Method::HEAD) => edit_page(&state, &route.id),
        (Action::Save, &Method::POST) => save_page(&state, &route.id, &body),
        _ => {
            tracing::debug!(%method, path = uri.path(), "Method not allowed for page route");
            Err(ServerError::RouteNotFound)
        }
    }
}

/// Show a page, or send the user to the edit form if it does not exist.
fn view_page(state: &AppState, id: &PageId) -> Result<Response, ServerError> {
    match state.store.load(id) {
        Ok(page) => {
            let html = state.templates.render_page(templates::VIEW, &page)?;
            Ok(Html(html).into_response())
        }
        Err(err) => {
            tracing::debug!(id = %id, error = %err, "Page missing, redirecting to editor");
            Ok(found(&Action::Edit.url(id)))
        }
    }
}

/// Show the edit form, pre-filled when the page exists and blank otherwise.
fn edit_page(state: &AppState, id: &PageId) -> Result<Response, ServerError> {
    let page = state.store.load(id).unwrap_or_else(|err| {
        tracing::debug!(id = %id, error = %err, "Page missing, rendering blank form");
        Page::blank(id)
    });
    let html = state.templates.render_page(templates::EDIT, &page)?;
    Ok(Html(html).into_response())
}

/// Persist submitted fields and redirect to the page view.
fn save_page(state: &AppState, id: &PageId, body: &[u8]) -> Result<Response, ServerError> {
    let form = SaveForm::parse(body)?;
    let page = Page {
        path: id.to_string(),
        title: form.title,
        body: form.body,
        footer: form.footer,
    };

    state.store.save(&page)?;
    tracing::info!(id = %id, "Page saved");

    Ok(found(&Action::View.url(id)))
}
