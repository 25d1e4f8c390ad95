//! `wiki serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use wiki_config::{CliSettings, Config};
use wiki_server::{run_server, server_config_from_wiki_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding page records (overrides config).
    #[arg(short, long, env = "WIKI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory of `*.html` templates overriding the built-in ones.
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            templates_dir: self.templates_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        output.highlight(&format!(
            "Starting wiki on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Data directory: {}",
            config.storage_resolved.data_dir.display()
        ));
        match &config.templates_resolved.dir {
            Some(dir) => output.info(&format!("Templates: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }

        let server_config = server_config_from_wiki_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
