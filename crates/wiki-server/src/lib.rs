//! HTTP server for the flat-file wiki.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - `GET /` - list of all pages
//! - `GET /view/<id>` - rendered page, or a redirect to its edit form
//! - `GET /edit/<id>` - edit form, blank for pages that don't exist yet
//! - `POST /save/<id>` - store the submitted form and redirect to the page
//!
//! Every other path is a 404.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "0.0.0.0".to_owned(),
//!         port: 9090,
//!         data_dir: PathBuf::from("data"),
//!         templates_dir: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (wiki-server)
//!                        │
//!                        ├─► Route::parse ──► view / edit / save handlers
//!                        │                         │
//!                        │                         ├─► PageStore (wiki-storage)
//!                        │                         └─► Templates (minijinja)
//!                        │
//!                        └─► front page handler ──► PageStore::list
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod route;
mod state;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use templates::Templates;
use wiki_storage::FsPageStore;

pub use templates::TemplateError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding page records.
    pub data_dir: PathBuf,
    /// Directory of templates overriding the built-in ones.
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 9090,
            data_dir: PathBuf::from("data"),
            templates_dir: None,
        }
    }
}

/// Run the server.
///
/// Creates the data directory if needed, compiles the templates once, then
/// serves until the process is killed.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the data directory cannot be created, a template
/// fails to load, or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsPageStore::new(config.data_dir.clone());
    store.ensure_data_dir()?;

    let templates = Templates::load(config.templates_dir.as_deref())?;

    let state = Arc::new(AppState {
        store: Arc::new(store),
        templates,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        data_dir = %config.data_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create server configuration from wiki config.
#[must_use]
pub fn server_config_from_wiki_config(config: &wiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.storage_resolved.data_dir.clone(),
        templates_dir: config.templates_resolved.dir.clone(),
    }
}
