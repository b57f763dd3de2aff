use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub const LOG_FILE_NAME: &str = "todolist.log";

const TUI_DEFAULT_FILTER: &str = "info";
const CLI_DEFAULT_FILTER: &str = "warn";

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _guard: WorkerGuard,
}

fn env_filter(filter: Option<&str>, default: &str) -> Result<EnvFilter> {
    let directive: Directive = filter
        .unwrap_or(default)
        .parse()
        .with_context(|| format!("invalid log filter '{}'", filter.unwrap_or(default)))?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

/// Route tracing output to a daily-rolling file under the data directory.
///
/// The terminal UI owns stdout and stderr, so nothing may be written there while it runs.
pub fn init_file_logging(config: &AppConfig, filter: Option<&str>) -> Result<LogGuard> {
    let log_dir = config.log_dir();
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter(filter, TUI_DEFAULT_FILTER)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(LogGuard { _guard: guard })
}

/// Compact stderr logging for one-shot commands; stdout stays reserved for command output.
pub fn init_stderr_logging(filter: Option<&str>) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter, CLI_DEFAULT_FILTER)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
