//! Application configuration with persistence.
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/notestack/config.json`
//! - macOS: `~/Library/Application Support/notestack/config.json`
//! - Windows: `%APPDATA%/notestack/config.json`
//!
//! A missing file means defaults. A file that exists but cannot be read or
//! parsed is an error; a bad corner name is never silently replaced.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::notify::{NotifierConfig, NotifierOptions};

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
const APP_NAME: &str = "notestack";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Horizontal padding suited to a terminal, in cells.
pub const TERMINAL_HORIZONTAL_PADDING: i32 = 2;

/// Vertical padding suited to a terminal, in rows.
pub const TERMINAL_VERTICAL_PADDING: i32 = 1;

// ============================================================================
// AppConfig
// ============================================================================

/// Persisted settings for the demo application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Options handed to the notifier.
    #[serde(default)]
    pub notifier: NotifierOptions,
    /// Fade-out delay applied to notes created from the keyboard or feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_fadeout_ms: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notifier: NotifierOptions {
                corner: None,
                horizontal_padding: Some(TERMINAL_HORIZONTAL_PADDING),
                vertical_padding: Some(TERMINAL_VERTICAL_PADDING),
                z_index: None,
            },
            default_fadeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its JSON is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .wrap_err_with(|| format!("failed to read config {}", path.display()));
            }
        };
        let config: Self = serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid config {}", path.display()))?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Validates the notifier options into a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending value, e.g. an unknown corner.
    pub fn notifier_config(&self) -> Result<NotifierConfig> {
        NotifierConfig::try_from(self.notifier.clone()).wrap_err("invalid notifier settings")
    }

    /// The default fade-out delay, if one is configured.
    #[must_use]
    pub fn default_fadeout(&self) -> Option<Duration> {
        self.default_fadeout_ms.map(Duration::from_millis)
    }
}

// ============================================================================
// Tests
// ============================================================================
