//! `app-persist` entry point.
//!
//! Opens `{base-dir}/.{app}` through the persistence facade, runs one
//! subcommand and prints its output.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use persist_cli::cli::Cli;
use persist_cli::commands;
use persist_core::AppPersistence;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let defaults = cli.load_defaults()?;
    let options = cli.persistence_options();
    let mut app = AppPersistence::open(&cli.app, defaults, options)
        .with_context(|| format!("failed to open storage for app '{}'", cli.app))?;
    debug!(root = %app.root().display(), "storage opened");

    let output = commands::execute(&mut app, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
