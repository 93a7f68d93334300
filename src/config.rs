//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and field is optional; an empty file yields the defaults.
//!
//! ```toml
//! [preferences]
//! presets_dir = "presets"
//! default_preset = "default"
//!
//! [driver]
//! frame_rate_hz = 30
//! log_interval_frames = 300
//! replay_path = ""
//!
//! [controls]
//! handbrake_button = "a"
//! sink = "keyboard"
//!
//! [controls.keys]
//! left = "a"
//! right = "d"
//! throttle = "w"
//! brake = "s"
//!
//! [telemetry]
//! enabled = false
//! log_dir = "./logs"
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::controller::keyboard::KeyAction;
use crate::controller::{Button, KeyMap};
use crate::error::{PoseDriveError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub driver: DriverConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Preset selection
#[derive(Debug, Deserialize, Clone)]
pub struct PreferencesConfig {
    #[serde(default = "default_presets_dir")]
    pub presets_dir: PathBuf,

    #[serde(default = "default_preset")]
    pub default_preset: String,
}

/// Frame loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DriverConfig {
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,

    #[serde(default = "default_log_interval_frames")]
    pub log_interval_frames: u64,

    /// Recorded landmark stream; empty runs without a pose source.
    #[serde(default)]
    pub replay_path: String,
}

/// Where control values are sent
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Axes become key presses
    #[default]
    Keyboard,
    /// Values are only logged
    Log,
}

/// Button and key assignments
#[derive(Debug, Deserialize, Clone)]
pub struct ControlsConfig {
    #[serde(default = "default_handbrake_button")]
    pub handbrake_button: Button,

    #[serde(default)]
    pub sink: SinkKind,

    #[serde(default)]
    pub keys: KeyMap,
}

/// Telemetry configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,

    #[serde(default = "default_record_interval_frames")]
    pub record_interval_frames: u64,
}

// Default value functions
fn default_presets_dir() -> PathBuf { PathBuf::from("presets") }
fn default_preset() -> String { "default".to_string() }

fn default_frame_rate_hz() -> u32 { 30 }
fn default_log_interval_frames() -> u64 { 300 }

fn default_handbrake_button() -> Button { Button::A }

fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }
fn default_record_interval_frames() -> u64 { 1 }

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            presets_dir: default_presets_dir(),
            default_preset: default_preset(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: default_frame_rate_hz(),
            log_interval_frames: default_log_interval_frames(),
            replay_path: String::new(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            handbrake_button: default_handbrake_button(),
            sink: SinkKind::default(),
            keys: KeyMap::default(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
            record_interval_frames: default_record_interval_frames(),
        }
    }
}

fn invalid(msg: impl std::fmt::Display) -> PoseDriveError {
    PoseDriveError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pose_drive::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` if parsing or validation fails
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Replay file, if one is configured
    #[must_use]
    pub fn replay_path(&self) -> Option<&Path> {
        let path = self.driver.replay_path.trim();
        (!path.is_empty()).then(|| Path::new(path))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.preferences.presets_dir.as_os_str().is_empty() {
            return Err(invalid("presets_dir cannot be empty"));
        }

        if self.preferences.default_preset.trim().is_empty() {
            return Err(invalid("default_preset cannot be empty"));
        }

        if !(1..=240).contains(&self.driver.frame_rate_hz) {
            return Err(invalid("frame_rate_hz must be between 1 and 240"));
        }

        if self.driver.log_interval_frames == 0 {
            return Err(invalid("log_interval_frames must be greater than 0"));
        }

        // Validate key map
        for (i, action) in KeyAction::ALL.iter().enumerate() {
            let key = self.controls.keys.key(*action);
            if key.trim().is_empty() {
                return Err(invalid(format!("key for {:?} cannot be empty", action)));
            }
            if KeyAction::ALL[..i]
                .iter()
                .any(|other| self.controls.keys.key(*other) == key)
            {
                return Err(invalid(format!("key '{}' is bound more than once", key)));
            }
        }

        // Validate telemetry configuration
        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(invalid("telemetry log_dir cannot be empty when enabled"));
        }

        for (name, value) in [
            ("max_records_per_file", self.telemetry.max_records_per_file as u64),
            ("max_files_to_keep", self.telemetry.max_files_to_keep as u64),
            ("record_interval_frames", self.telemetry.record_interval_frames),
        ] {
            if value == 0 {
                return Err(invalid(format!("{} must be greater than 0", name)));
            }
        }

        Ok(())
    }
}
