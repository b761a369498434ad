//! Tracing setup.
//!
//! The terminal belongs to the UI, so log lines go to `<program>.log` in
//! the configured directory instead of stderr. The filter comes from
//! `RUST_LOG` when set, otherwise from the configured level.

use crate::config::LogConfig;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

/// Path of the log file for `program`.
pub fn log_file(program: &str, config: &LogConfig) -> PathBuf {
    config.directory().join(format!("{program}.log"))
}

/// Installs the global subscriber writing to `<program>.log`.
pub fn init(program: &str, config: &LogConfig) -> Result<()> {
    let dir = config.directory();
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(program)
        .filename_suffix("log")
        .build(&dir)
        .map_err(|e| Error::Logging(e.to_string()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_writer(appender)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!("{} v{} started", program, env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Like [`init`], but a failure is reported on stderr and the program runs
/// on without logs.
pub fn init_or_warn(program: &str, config: &LogConfig) {
    if let Err(e) = init(program, config) {
        eprintln!("{program}: logging disabled: {e}");
    }
}
