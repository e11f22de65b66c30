//! Diagnostic Logging
//!
//! The terminal belongs to the participant for the whole session, so
//! operator-facing diagnostics are written to a file instead of stderr.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_FILE_NAME: &str = "experiment.log";

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("category_learning=info"));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .try_init()
        .context("Failed to set tracing subscriber")?;

    Ok(guard)
}
