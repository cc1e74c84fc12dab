// src/logging.rs

//! Logging setup for `wavedag` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `WAVEDAG_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! Logs go to STDERR; STDOUT carries only the runtime report.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level
        .map(Level::from)
        .or_else(|| env_level(std::env::var("WAVEDAG_LOG").ok().as_deref()))
        .unwrap_or(Level::WARN);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to initialise logging")?;

    Ok(())
}

/// Level named by `WAVEDAG_LOG`; unknown values fall back to the default.
fn env_level(value: Option<&str>) -> Option<Level> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_level_accepts_any_case_and_ignores_garbage() {
        assert_eq!(env_level(Some(" DEBUG ")), Some(Level::DEBUG));
        assert_eq!(env_level(Some("warn")), Some(Level::WARN));
        assert_eq!(env_level(Some("loud")), None);
        assert_eq!(env_level(None), None);
    }

    #[test]
    fn cli_level_maps_onto_tracing_level() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }
}
