//! Logging setup for slimframe.
//!
//! Logs go to the console and to a daily-rotated file in the platform data
//! directory. The library itself only emits `tracing` events; installing a
//! subscriber is left to the binary (or to whoever embeds the library).
//!
//! ```no_run
//! slimframe::logging::init().expect("Failed to initialize logging");
//! tracing::info!("App started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const LOG_PREFIX: &str = "slimframe";

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/slimframe/logs`
/// - macOS: `~/Library/Application Support/slimframe/logs`
/// - Linux: `~/.local/share/slimframe/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("slimframe").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes console and file logging.
///
/// The default level is `info` and can be overridden with `RUST_LOG`. When
/// `verbose` is set the console shows `debug` events from this crate as well,
/// which includes the per-column decisions.
///
/// # Errors
///
/// Returns error if the log directory or the file appender cannot be created.
pub fn init_with(verbose: bool) -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let default_directive = if verbose { "info,slimframe=debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging initialized, log directory: {:?}", log_dir);
    Ok(())
}

pub fn init() -> Result<()> {
    init_with(false)
}
