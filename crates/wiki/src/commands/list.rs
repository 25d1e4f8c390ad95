//! `wiki list` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use wiki_config::{CliSettings, Config};
use wiki_storage::{FsPageStore, PageStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding page records (overrides config).
    #[arg(short, long, env = "WIKI_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// Prints one page identifier per line to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the data directory cannot
    /// be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (data_dir, ids) = self.page_ids()?;

        output.highlight(&format!("{} page(s) in {}", ids.len(), data_dir.display()));

        let mut stdout = Term::stdout();
        write_ids(&mut stdout, &ids)?;

        Ok(())
    }

    /// Resolve the data directory and list the pages stored there.
    fn page_ids(self) -> Result<(PathBuf, Vec<String>), CliError> {
        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let store = FsPageStore::new(config.storage_resolved.data_dir);
        let ids = store.list()?;
        Ok((store.data_dir().to_path_buf(), ids))
    }
}

/// Write one identifier per line.
fn write_ids(out: &mut impl Write, ids: &[String]) -> std::io::Result<()> {
    for id in ids {
        writeln!(out, "{id}")?;
    }
    out.flush()
}
