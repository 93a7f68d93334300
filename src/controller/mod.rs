//! # Controller Module
//!
//! From landmarks to virtual controller calls.
//!
//! This module handles:
//! - Extracting steering and pedal features from a landmark frame
//! - Holding the last good feature across missed detections
//! - Writing axes and edge-triggered buttons to a controller sink
//! - Turning axes into key presses for keyboard-driven games

pub mod feature;
pub mod keyboard;
pub mod sink;
pub mod trigger;

pub use feature::{ControlFeature, FeatureExtractor};
pub use keyboard::{KeyMap, KeyboardSink};
pub use sink::{Button, ControllerSink, LoggingSink};
pub use trigger::{ButtonEdge, ButtonEdgeState, ControlTrigger, EdgeLatch};
