//! Logging initialization

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Initialize logging based on debug flag
///
/// Logs go to a temp file so the TUI keeps the terminal. Returns the log
/// file path if debug logging is enabled.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        return Ok(None);
    }

    let (file, path) = tempfile::Builder::new()
        .prefix("fluxcli-")
        .suffix(".log")
        .tempfile()
        .context("Failed to create log file")?
        .keep()
        .context("Failed to persist log file")?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(Some(path))
}
