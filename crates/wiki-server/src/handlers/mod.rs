//! HTTP request handlers.

pub(crate) mod front_page;
pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;

/// Respond with `302 Found` to `location`.
///
/// `axum::response::Redirect` only offers 303/307/308.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

/// Handle any request that matches no route.
pub(crate) async fn not_found() -> ServerError {
    ServerError::RouteNotFound
}
