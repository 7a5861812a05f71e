// Chunk: docs/chunks/editor_config - JSON editor configuration
//!
//! Editor configuration.
//!
//! The configuration file is JSON and every field is optional; missing fields
//! take their defaults. It is read from:
//! - Linux: `~/.config/gapedit/config.json`
//! - macOS: `~/Library/Application Support/gapedit/config.json`
//!
//! A missing file is not an error. An unreadable or malformed file is reported
//! by [`EditorConfig::load`]; [`EditorConfig::load_or_default`] logs it and
//! falls back to the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gapedit_buffer::{DocumentSettings, DEFAULT_GAP_INCREMENT, DEFAULT_TAB_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application name used for the config directory.
const APP_NAME: &str = "gapedit";

/// Config file name.
const CONFIG_FILENAME: &str = "config.json";

/// Errors that can occur while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables for documents and views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Slots the gap buffer grows by when it runs out.
    pub gap_increment: usize,
    /// Columns a tab occupies.
    pub tab_width: usize,
    /// Height of one line in pixels.
    pub row_height: f32,
    /// Lines that fit in a view.
    pub visible_lines: usize,
    /// Scroll easing rate per second; 0 disables the animation.
    pub scroll_smoothing: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gap_increment: DEFAULT_GAP_INCREMENT,
            tab_width: DEFAULT_TAB_WIDTH,
            row_height: 16.0,
            visible_lines: 40,
            scroll_smoothing: 12.0,
        }
    }
}

impl EditorConfig {
    /// Reads the configuration at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Reads the configuration from the platform config directory, falling
    /// back to the defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        Self::load(&path).unwrap_or_else(|err| {
            log::warn!("{}; using default configuration", err);
            Self::default()
        })
    }

    /// Settings for newly created documents.
    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            gap_increment: self.gap_increment,
            tab_width: self.tab_width,
        }
    }

    /// Replaces values that would break the editor with their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.gap_increment == 0 {
            log::warn!("gap_increment must be positive; using {}", defaults.gap_increment);
            self.gap_increment = defaults.gap_increment;
        }
        if self.row_height.is_nan() || self.row_height <= 0.0 {
            log::warn!("row_height must be positive; using {}", defaults.row_height);
            self.row_height = defaults.row_height;
        }
        if self.visible_lines == 0 {
            log::warn!("visible_lines must be positive; using {}", defaults.visible_lines);
            self.visible_lines = defaults.visible_lines;
        }
        if self.scroll_smoothing.is_nan() || self.scroll_smoothing < 0.0 {
            self.scroll_smoothing = defaults.scroll_smoothing;
        }
        self
    }
}

/// Returns the path to the config file, or `None` if the platform config
/// directory cannot be determined.
pub fn config_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILENAME))
}
