//! Error types shared by the termdesk programs.
//!
//! Nothing in these programs is fatal once the UI is running: illegal
//! actions are ignored by the dispatcher, and I/O failures are turned into
//! warning prompts by the notepad. These types carry the failures up to
//! the point where that decision is made.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a clock string such as `"00:05:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The string did not have two or three `:`-separated fields.
    #[error("expected HH:MM:SS or MM:SS, got {0:?}")]
    Shape(String),

    /// A field was not a decimal number.
    #[error("invalid number {0:?}")]
    Number(String),

    /// Minutes or seconds were outside `0..=59`.
    #[error("{field} out of range: {value}")]
    Range {
        /// Which field overflowed ("minutes" or "seconds").
        field: &'static str,
        /// The offending value.
        value: u64,
    },

    /// The value does not fit in a `u64` second count.
    #[error("duration too large: {0:?}")]
    Overflow(String),
}

/// Failure to load the JSON configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("cannot parse config {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to open or save a notepad document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Reading the file failed (missing, unreadable, not UTF-8).
    #[error("cannot open '{}': {source}", display_name(.path))]
    Open {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the file failed.
    #[error("cannot save '{}': {source}", display_name(.path))]
    Save {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// The path the failed operation was working on.
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentError::Open { path, .. } | DocumentError::Save { path, .. } => path,
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Umbrella error for start-up and library operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Clock parsing error.
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Document I/O error.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Logging could not be initialised.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Other I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for termdesk operations.
pub type Result<T> = std::result::Result<T, Error>;
