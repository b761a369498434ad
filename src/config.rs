//! JSON configuration shared by the four programs.
//!
//! The file is looked up at `$TERMDESK_CONFIG`, falling back to
//! `termdesk.json` in the working directory. Every field has a default, so a
//! missing file or a partial file is fine:
//!
//! ```json
//! {
//!   "countdown": {
//!     "presets": [{ "label": "3 min", "seconds": 180 }],
//!     "format": "MM:SS",
//!     "alarm": { "frame_interval_ms": 40 }
//!   },
//!   "notepad": { "font_size": 12 },
//!   "log": { "level": "debug" }
//! }
//! ```
//!
//! A binary loads the file once with [`load`], stores it with [`init`], and
//! the bubbletea models read it back through [`get`] in their `init()`.

use crate::animator::AlarmSettings;
use crate::clock::ClockFormat;
use crate::error::ConfigError;
use crate::notepad::NotepadSettings;
use crate::preset::{default_presets, Preset};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TERMDESK_CONFIG";

/// File name used when the variable is not set.
pub const DEFAULT_CONFIG_FILE: &str = "termdesk.json";

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Whole configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub countdown: CountdownConfig,
    pub stopwatch: StopwatchConfig,
    pub notepad: NotepadSettings,
    pub log: LogConfig,
}

/// Countdown timer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Preset buttons, in order.
    pub presets: Vec<Preset>,
    /// How the remaining time is shown.
    pub format: ClockFormat,
    /// Alarm animation.
    pub alarm: AlarmSettings,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            format: ClockFormat::default(),
            alarm: AlarmSettings::default(),
        }
    }
}

/// Stopwatch settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    pub format: ClockFormat,
}

/// Log file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for `<program>.log`; the system temp dir when absent.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl LogConfig {
    /// Where log files go.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("termdesk"))
    }
}

/// Config path for an optional override, usually `$TERMDESK_CONFIG`.
pub fn config_path(override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration from the default location.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    load_from(&path)
}

/// Loads the configuration from `path`. A missing file gives defaults.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Stores the process-wide configuration. Returns `false` if it was
/// already set, in which case the first value is kept.
pub fn init(config: Config) -> bool {
    CONFIG.set(config).is_ok()
}

/// The process-wide configuration, or defaults if [`init`] was never called.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
