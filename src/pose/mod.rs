//! # Pose Module
//!
//! Landmark frames and the sources that produce them.
//!
//! This module handles:
//! - The fixed-size landmark frame and its index groups
//! - The pose source abstraction (one detection per frame, or none)
//! - Replaying recorded landmark streams from JSONL files

pub mod landmarks;
pub mod replay;

pub use landmarks::{groups, LandmarkFrame, LANDMARK_COUNT};
pub use replay::ReplaySource;

use crate::error::Result;

/// Produces one detection result per frame.
///
/// `Ok(Some(None))` means the detector ran but found nobody; `Ok(None)`
/// means the source is exhausted and the frame loop should stop.
pub trait PoseSource {
    /// Polls the next detection.
    fn poll(&mut self) -> Result<Option<Option<LandmarkFrame>>>;
}

/// A source that never detects anyone and never ends.
///
/// Used by the binary when no replay file is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleSource;

impl PoseSource for IdleSource {
    fn poll(&mut self) -> Result<Option<Option<LandmarkFrame>>> {
        Ok(Some(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_source_never_detects() {
        let mut source = IdleSource;
        for _ in 0..5 {
            assert_eq!(source.poll().unwrap(), Some(None));
        }
    }
}
