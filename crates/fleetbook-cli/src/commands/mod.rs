//! Command handlers.
//!
//! Each handler translates parsed arguments into service calls and renders
//! the outcome. No admission rules live here.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use tracing::debug;

use fleetbook_adapters::Fleet;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

pub mod booking;
pub mod completions;
pub mod config;
pub mod customer;
pub mod init;
pub mod taxi;

/// `--data-dir` if given, otherwise `store.data_dir` from the configuration.
pub fn data_dir(global: &GlobalArgs, config: &AppConfig) -> PathBuf {
    global
        .data_dir
        .clone()
        .unwrap_or_else(|| config.store.data_dir.clone())
}

/// Open the JSON-backed fleet the command operates on.
pub fn open_fleet(global: &GlobalArgs, config: &AppConfig) -> CliResult<Fleet> {
    let dir = data_dir(global, config);
    debug!(data_dir = %dir.display(), "Resolved data directory");
    Ok(Fleet::open(dir)?)
}

/// Ask before a destructive step.
///
/// Skipped (treated as yes) with `--yes`, `--quiet`, or when stdin is not a
/// terminal.
pub fn confirm(prompt: &str, yes: bool, global: &GlobalArgs) -> CliResult<bool> {
    if yes || global.quiet || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    ask(prompt)
}

#[cfg(feature = "interactive")]
fn ask(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| crate::error::CliError::IoError {
            message: format!("Failed to read confirmation: {e}"),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(_prompt: &str) -> CliResult<bool> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
