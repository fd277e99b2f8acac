//! Command-line argument definitions.
//!
//! ```text
//! app-persist --app <NAME> [OPTIONS] <COMMAND>
//!
//! Commands:
//!   config get <PATH> [--kind KIND]      Read a config value by path
//!   config set <PATH> <JSON> [--strict]  Write a config value by path
//!   config show                          Print the whole config document
//!   state get <KEY> [--default JSON]     Read a state value
//!   state set <KEY> <JSON>               Write a state value
//!   geometry save <NAME> <FILE>          Store a file's bytes as geometry
//!   geometry load <NAME> <FILE>          Write saved geometry to a file
//! ```
//!
//! | Variable               | Description                          |
//! |------------------------|--------------------------------------|
//! | `APP_PERSIST_APP`      | Application name (`--app`)           |
//! | `APP_PERSIST_BASE_DIR` | Base directory (`--base-dir`)        |
//! | `RUST_LOG`             | Log filter, overrides `--log-level`  |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use persist_core::infrastructure::json_file;
use persist_core::{ConfigOptions, Document, PersistenceOptions, ValueKind, VersionPolicy};

/// Inspect and edit the JSON config and state files of an application.
#[derive(Debug, Parser)]
#[command(name = "app-persist", version)]
pub struct Cli {
    /// Application name; files live in `{base-dir}/.{app}`.
    #[arg(long, env = "APP_PERSIST_APP")]
    pub app: String,

    /// Parent directory of the application directory [default: home].
    #[arg(long, env = "APP_PERSIST_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// JSON file holding the config defaults, used when `config.json` is
    /// created or reset.
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Replace `config.json` with the defaults when their `config_version`
    /// differs from the stored one.
    #[arg(long)]
    pub reset_on_version_change: bool,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Settings in `config.json`.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// UI state in `state.json`.
    #[command(subcommand)]
    State(StateCommand),
    /// Saved window geometry blobs.
    #[command(subcommand)]
    Geometry(GeometryCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Read a value by slash-delimited path.
    Get {
        path: String,
        /// Expected kind: any, bool, integer, float, string, array, object.
        #[arg(long, default_value = "any")]
        kind: ValueKind,
    },
    /// Write a value by slash-delimited path.  Values that are not valid JSON
    /// are stored as strings.
    Set {
        path: String,
        value: String,
        /// Fail when an intermediate segment is missing or not an object.
        #[arg(long)]
        strict: bool,
    },
    /// Print the whole document.
    Show,
}

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// Read a value; with `--default`, store and return it when absent.
    Get {
        key: String,
        #[arg(long)]
        default: Option<String>,
    },
    /// Write a value.
    Set { key: String, value: String },
}

#[derive(Debug, Subcommand)]
pub enum GeometryCommand {
    /// Save the bytes of FILE under NAME.
    Save(GeometryArgs),
    /// Write the bytes saved under NAME to FILE.
    Load(GeometryArgs),
}

#[derive(Debug, Args)]
pub struct GeometryArgs {
    pub name: String,
    pub file: PathBuf,
}

impl Cli {
    /// Reads the defaults document named by `--defaults`, or an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load_defaults(&self) -> anyhow::Result<Document> {
        match &self.defaults {
            Some(path) => json_file::read_document(path)
                .with_context(|| format!("failed to load defaults from {}", path.display())),
            None => Ok(Document::new()),
        }
    }

    /// Builds the facade options from the parsed flags.
    pub fn persistence_options(&self) -> PersistenceOptions {
        let versioning = if self.reset_on_version_change {
            VersionPolicy::ResetOnMismatch
        } else {
            VersionPolicy::KeepExisting
        };
        PersistenceOptions {
            base_dir: self.base_dir.clone(),
            config: ConfigOptions {
                versioning,
                ..ConfigOptions::default()
            },
        }
    }
}
