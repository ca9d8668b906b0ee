//! TOML-based configuration and persisted UI state.
//!
//! `AppConfig` lives in one file per user:
//! - Windows:  `%APPDATA%\Keyview\config.toml`
//! - Linux:    `~/.config/keyview/config.toml`
//! - macOS:    `~/Library/Application Support/Keyview/config.toml`
//!
//! ```toml
//! [display]
//! viewport_width = 960.0
//! viewport_height = 360.0
//! padding = 12.0
//!
//! [ui]
//! selected_layout_index = 0
//! last_device = "Corne"
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section, or
//! a config written by an older version all load cleanly.

use std::path::{Path, PathBuf};

use keyview_core::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failures reading or writing the Keyview config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `APPDATA`, `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("no config directory known for this platform")]
    NoPlatformConfigDir,

    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Everything Keyview stores between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiState,
}

/// Size of the drawing surface the layout is fitted into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Pixels kept free around the layout on every side.
    #[serde(default = "default_padding")]
    pub padding: f64,
}

/// Light UI state remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiState {
    /// Physical layout shown last time, if the device still has it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_layout_index: Option<usize>,
    /// Name of the last device that was connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_device: Option<String>,
    /// Filter used when `RUST_LOG` is unset, e.g. `"debug"` or `"keyview_app=trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

fn default_viewport_width() -> f64 {
    960.0
}
fn default_viewport_height() -> f64 {
    360.0
}
fn default_padding() -> f64 {
    keyview_core::domain::viewport::DEFAULT_PADDING
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            padding: default_padding(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_layout_index: None,
            last_device: None,
            log_level: default_log_level(),
        }
    }
}

impl DisplayConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height).with_padding(self.padding)
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Location of `config.toml` for the current user.
///
/// # Errors
///
/// [`ConfigError::NoPlatformConfigDir`] when no base directory is available.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Reads the user's config file.  See [`load_config_from`].
///
/// # Errors
///
/// Also fails with [`ConfigError::NoPlatformConfigDir`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Writes the user's config file.  See [`save_config_to`].
///
/// # Errors
///
/// Also fails with [`ConfigError::NoPlatformConfigDir`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Reads `path`.  A file that does not exist yet yields the defaults.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file exists but cannot be read,
/// [`ConfigError::Parse`] when it is not valid config TOML.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating missing parent directories.
///
/// # Errors
///
/// [`ConfigError::Io`] or [`ConfigError::Serialize`].
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Per-user Keyview directory: `Keyview` on Windows and macOS, `keyview` on Linux.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Keyview"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("keyview"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Keyview")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
