//! Wiki CLI - flat-file personal wiki.
//!
//! Provides commands for:
//! - `serve`: Start the wiki server
//! - `list`: Print the identifiers of all stored pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, ServeArgs};
use output::Output;

/// Wiki - flat-file personal wiki.
#[derive(Parser)]
#[command(name = "wiki", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server.
    Serve(ServeArgs),
    /// List stored pages.
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(error::CliError::Server(format!(
                "Failed to create tokio runtime: {e}"
            ))),
        },
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
