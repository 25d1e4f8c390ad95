//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wiki_storage::StorageError;

/// Server error type.
///
/// Storage and template failures reach the client as a 500 whose body is the
/// error text.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Request path or method does not address any page action.
    #[error("Not found")]
    RouteNotFound,

    /// Page store failure.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template render failure.
    #[error("{0}")]
    Template(#[from] minijinja::Error),

    /// Save request body is not valid form data.
    #[error("Invalid form data: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::RouteNotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Form(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Self::Storage(_) | Self::Template(_) => {
                tracing::warn!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
