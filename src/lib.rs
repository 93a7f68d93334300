//! # Pose Drive Library
//!
//! Drive a racing game with your body: hand positions steer, leaning
//! towards or away from the camera works the pedals.
//!
//! This library turns per-frame pose landmarks into virtual controller
//! input, with named calibration presets persisted as JSON.

pub mod calibration;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod pose;
pub mod preset;
pub mod telemetry;
