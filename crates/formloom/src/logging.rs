#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! The TUI owns the terminal, so logs only go to a file. Without
//! `--log-file` no subscriber is installed and `tracing` macros are no-ops.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "FORMLOOM_LOG";

const DEFAULT_FILTER: &str = "info";

/// Filter from `FORMLOOM_LOG`, falling back to `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global fmt subscriber writing to `path`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
