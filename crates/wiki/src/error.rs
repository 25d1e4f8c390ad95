//! CLI error types.

use wiki_config::ConfigError;
use wiki_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Server(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
