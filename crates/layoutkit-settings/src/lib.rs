//! LayoutKit Settings Crate
//!
//! Handles editor configuration: zoom and grid defaults, preview colors,
//! logging and the recent files list.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, LogLevel, LoggingSettings, RenderSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
