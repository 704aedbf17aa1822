// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[viewer]` - Scale bounds, gesture increments and responsive layout
//! - `[audio]` - Playback volume
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `SOUNDMAP_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use soundmap::config;
//!
//! let (mut config, _warning) = config::load();
//! config.viewer.max_scale = Some(2.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Which viewport axis drives the base size of the image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Width-driven on wide viewports, height-driven at or below the breakpoint.
    #[default]
    Auto,
    /// Always width-driven.
    Width,
    /// Always height-driven.
    Height,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Viewer scale and gesture settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Initial scale, which is also the minimum scale.
    #[serde(default = "default_scale", skip_serializing_if = "Option::is_none")]
    pub default_scale: Option<f32>,

    /// Maximum scale.
    #[serde(default = "default_max_scale", skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f32>,

    /// Scale delta per wheel notch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_step: Option<f32>,

    /// Scale delta for zoom buttons and keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_step: Option<f32>,

    /// Offset delta for arrow keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_step: Option<f32>,

    /// Movement beyond which a press stops counting as a tap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_threshold: Option<f32>,

    /// Layout axis selection.
    #[serde(default)]
    pub layout: LayoutMode,

    /// Width at or below which `auto` layout becomes height-driven.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrow_breakpoint: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_scale: Some(DEFAULT_SCALE),
            max_scale: Some(MAX_SCALE),
            wheel_step: Some(WHEEL_ZOOM_STEP),
            button_step: Some(BUTTON_ZOOM_STEP),
            pan_step: Some(KEYBOARD_PAN_STEP),
            drag_threshold: Some(DRAG_THRESHOLD),
            layout: LayoutMode::Auto,
            narrow_breakpoint: Some(NARROW_BREAKPOINT),
        }
    }
}

/// Audio playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub audio: AudioConfig,
}

fn default_scale() -> Option<f32> {
    Some(DEFAULT_SCALE)
}

fn default_max_scale() -> Option<f32> {
    Some(MAX_SCALE)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Concrete viewer settings with every value validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub default_scale: f32,
    pub max_scale: f32,
    pub wheel_step: f32,
    pub button_step: f32,
    pub pan_step: f32,
    pub drag_threshold: f32,
    pub layout: LayoutMode,
    pub narrow_breakpoint: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        ViewerConfig::default().settings()
    }
}

/// Keeps a configured value if it is finite and positive.
fn positive_or(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback)
}

impl ViewerConfig {
    /// Resolves optional fields into validated settings.
    ///
    /// Non-positive or non-finite values fall back to defaults, and the maximum
    /// scale is raised to the default scale if configured below it.
    #[must_use]
    pub fn settings(&self) -> ViewerSettings {
        let default_scale = positive_or(self.default_scale, DEFAULT_SCALE);
        let max_scale = positive_or(self.max_scale, MAX_SCALE).max(default_scale);
        let drag_threshold = self
            .drag_threshold
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(DRAG_THRESHOLD);

        ViewerSettings {
            default_scale,
            max_scale,
            wheel_step: positive_or(self.wheel_step, WHEEL_ZOOM_STEP),
            button_step: positive_or(self.button_step, BUTTON_ZOOM_STEP),
            pan_step: positive_or(self.pan_step, KEYBOARD_PAN_STEP),
            drag_threshold,
            layout: self.layout,
            narrow_breakpoint: positive_or(self.narrow_breakpoint, NARROW_BREAKPOINT),
        }
    }
}

impl AudioConfig {
    /// Returns the configured volume clamped to the valid range.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(MIN_VOLUME, MAX_VOLUME)
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(err) => (
                    Config::default(),
                    Some(format!("ignoring {}: {err}", path.display())),
                ),
            };
        }
    }
    (Config::default(), None)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".to_string())),
    }
}

/// Loads a configuration file from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Writes a configuration file to an explicit path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any file system operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
