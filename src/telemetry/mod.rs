//! # Telemetry Module
//!
//! Records the controls sent each frame to JSONL files with rotation.
//!
//! This module handles:
//! - Building one [`ControlRecord`] per recorded frame
//! - Formatting as JSONL (JSON Lines)
//! - Rotating files after a fixed number of records
//! - Retaining only the newest files
//!
//! A record line looks like:
//!
//! ```text
//! {"timestamp":"2024-05-01T12:00:00.000000+00:00","frame":42,"preset":"default","steer":0.25,"throttle":0.0,"brake":0.5,"steer_angle":18.2,"held":false}
//! ```

pub mod logger;

pub use logger::TelemetryLogger;

use serde::{Deserialize, Serialize};

use crate::controller::ControlFeature;

/// Controls written to the sink for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    /// Wall-clock time, RFC 3339.
    pub timestamp: String,
    pub frame: u64,
    pub preset: String,
    pub steer: f64,
    pub throttle: f64,
    pub brake: f64,
    pub steer_angle: f64,
    /// Whether the feature was carried over from an earlier frame.
    pub held: bool,
}

impl ControlRecord {
    /// Captures `feature` with the current time.
    #[must_use]
    pub fn new(frame: u64, preset: &str, feature: &ControlFeature, held: bool) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            frame,
            preset: preset.to_string(),
            steer: feature.steer_axis(),
            throttle: feature.throttle_pressure,
            brake: feature.brake_pressure,
            steer_angle: feature.steer_angle,
            held,
        }
    }
}
