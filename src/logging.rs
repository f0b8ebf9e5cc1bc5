//! Logging through `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so events go to the log file named in
//! [`Config`]. The level comes from `RUST_LOG` and defaults to `info`. Record
//! contents are only logged at `debug`.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))
}
