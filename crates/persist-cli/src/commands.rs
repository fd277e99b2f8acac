//! Executes a parsed [`Command`] against an opened [`AppPersistence`].
//!
//! Every command returns the text to print.  Values are printed as pretty
//! JSON; an absent value prints `null`.

use anyhow::Context;
use persist_core::{AppPersistence, PathOutcome};
use serde_json::Value;
use tracing::warn;

use crate::cli::{Command, ConfigCommand, GeometryCommand, StateCommand};

/// Parses a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Runs `command` and returns its printable output.
///
/// # Errors
///
/// Store errors are returned with the failing key or path as context.
pub fn execute(app: &mut AppPersistence, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Config(cmd) => execute_config(app, cmd),
        Command::State(cmd) => execute_state(app, cmd),
        Command::Geometry(cmd) => execute_geometry(app, cmd),
    }
}

fn execute_config(app: &mut AppPersistence, command: ConfigCommand) -> anyhow::Result<String> {
    match command {
        ConfigCommand::Get { path, kind } => {
            let value = app
                .config
                .get_by_path(&path, kind)
                .with_context(|| format!("config get [{path}]"))?;
            render(value.as_ref())
        }
        ConfigCommand::Set { path, value, strict } => {
            let outcome = app
                .config
                .set_by_path(&path, &parse_value(&value))
                .with_context(|| format!("config set [{path}]"))?;
            match outcome {
                PathOutcome::Blocked(block) if !strict => {
                    warn!(%block, "nothing written");
                }
                outcome => outcome.require()?,
            }
            Ok(String::new())
        }
        ConfigCommand::Show => {
            let doc = app.config.get_document().context("config show")?;
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}

fn execute_state(app: &mut AppPersistence, command: StateCommand) -> anyhow::Result<String> {
    match command {
        StateCommand::Get { key, default } => {
            let value = app
                .state
                .get_value(&key, default.as_deref().map(parse_value))
                .with_context(|| format!("state get [{key}]"))?;
            render(value.as_ref())
        }
        StateCommand::Set { key, value } => {
            app.state
                .set_value(&key, &parse_value(&value))
                .with_context(|| format!("state set [{key}]"))?;
            Ok(String::new())
        }
    }
}

fn execute_geometry(app: &mut AppPersistence, command: GeometryCommand) -> anyhow::Result<String> {
    match command {
        GeometryCommand::Save(args) => {
            let bytes = std::fs::read(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            app.state
                .save_geometry(&args.name, &bytes)
                .with_context(|| format!("geometry save [{}]", args.name))?;
            Ok(String::new())
        }
        GeometryCommand::Load(args) => {
            let loaded = app
                .state
                .get_geometry(&args.name)
                .with_context(|| format!("geometry load [{}]", args.name))?;
            let Some(bytes) = loaded else {
                return render(None);
            };
            std::fs::write(&args.file, &bytes)
                .with_context(|| format!("failed to write {}", args.file.display()))?;
            Ok(format!("{} bytes", bytes.len()))
        }
    }
}

fn render(value: Option<&Value>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value.unwrap_or(&Value::Null))?)
}
