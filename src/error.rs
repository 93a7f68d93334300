//! # Error Types
//!
//! Custom error types for Pose Drive using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Pose Drive
#[derive(Debug, Error)]
pub enum PoseDriveError {
    /// A preset name that is not registered
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// The active preset was unregistered and no replacement applied
    #[error("No active preset, apply one before processing frames")]
    NoActivePreset,

    /// Reserved presets cannot be removed
    #[error("Preset '{0}' is reserved and cannot be unregistered")]
    ReservedPreset(String),

    /// Persisted preset file could not be parsed
    #[error("Malformed preset file {path}: {source}")]
    MalformedPreset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A landmark group averaged over zero points
    #[error("Landmark group '{0}' is empty")]
    EmptyLandmarkGroup(&'static str),

    /// A frame carried the wrong number of landmarks
    #[error("Expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON errors (replay frames, telemetry records)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Pose Drive
pub type Result<T> = std::result::Result<T, PoseDriveError>;
