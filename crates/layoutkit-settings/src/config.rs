//! Configuration and settings management for LayoutKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Editor defaults (zoom, grid, history, new area size)
//! - Preview colors used when rasterizing a layout
//! - Logging (level and optional log file)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use layoutkit_core::constants::{
    DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH, DEFAULT_HISTORY_LIMIT, GRID_SIZE, MAX_ZOOM,
    MIN_AREA_SIZE, MIN_ZOOM,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Editor defaults applied when a layout is opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Zoom a layout opens at
    pub default_zoom: f64,
    /// Snap pointer positions to the grid
    pub grid_snap: bool,
    /// Grid pitch in layout units
    pub grid_size: f64,
    /// Draw vertex markers on polygon areas
    pub show_vertex_handles: bool,
    /// Number of undo steps retained
    pub history_limit: usize,
    /// Size of a rectangle area created with a single click
    pub new_area_width: f64,
    pub new_area_height: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_zoom: 1.0,
            grid_snap: false,
            grid_size: GRID_SIZE,
            show_vertex_handles: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            new_area_width: DEFAULT_AREA_WIDTH,
            new_area_height: DEFAULT_AREA_HEIGHT,
        }
    }
}

/// Colors for the raster preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub background: String,
    pub selection_color: String,
    pub handle_color: String,
    /// Color of the cross drawn over shapes that cannot be rendered
    pub marker_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: "#fafafa".to_string(),
            selection_color: "#ff9800".to_string(),
            handle_color: "#1976d2".to_string(),
            marker_color: "#d32f2f".to_string(),
        }
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::ValueOutOfRange {
                key: "logging.level".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level; `RUST_LOG` takes precedence
    pub level: LogLevel,
    /// Append log output to this file instead of stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// File format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn default_max_recent_files() -> usize {
    10
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recent layout files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Number of recent files to track
    #[serde(default = "default_max_recent_files")]
    pub max_recent_files: usize,
    /// Editor defaults
    pub editor: EditorSettings,
    /// Preview colors
    pub render: RenderSettings,
    /// Logging
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            max_recent_files: default_max_recent_files(),
            editor: EditorSettings::default(),
            render: RenderSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/layoutkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("layoutkit").join("config.toml"))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
    }

    /// Loads the config at the default path, or defaults when there is none.
    pub fn load_or_default() -> SettingsResult<Self> {
        Self::load_or_default_from(&Self::default_path()?)
    }

    /// Loads the config at `path`, or defaults when the file does not exist.
    pub fn load_or_default_from(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating the parent directory
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let editor = &self.editor;
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&editor.default_zoom) {
            return Err(out_of_range("editor.default_zoom", editor.default_zoom));
        }
        if editor.grid_size.is_nan() || editor.grid_size <= 0.0 {
            return Err(out_of_range("editor.grid_size", editor.grid_size));
        }
        if editor.history_limit == 0 {
            return Err(out_of_range("editor.history_limit", editor.history_limit));
        }
        if editor.new_area_width.is_nan() || editor.new_area_width < MIN_AREA_SIZE {
            return Err(out_of_range("editor.new_area_width", editor.new_area_width));
        }
        if editor.new_area_height.is_nan() || editor.new_area_height < MIN_AREA_SIZE {
            return Err(out_of_range("editor.new_area_height", editor.new_area_height));
        }

        let render = &self.render;
        for (key, value) in [
            ("render.background", &render.background),
            ("render.selection_color", &render.selection_color),
            ("render.handle_color", &render.handle_color),
            ("render.marker_color", &render.marker_color),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigError::InvalidColor {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.max_recent_files == 0 {
            return Err(out_of_range("max_recent_files", self.max_recent_files));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.max_recent_files);
    }
}
