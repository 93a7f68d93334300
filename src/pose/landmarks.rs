//! # Landmark Frame
//!
//! One detection result: 33 body keypoints in normalized image space.
//!
//! ## Index Groups
//!
//! | Group | Indices | Body part |
//! |-------|---------|-----------|
//! | Left hand | 15, 17, 19, 21 | wrist, pinky, index, thumb |
//! | Right hand | 16, 18, 20, 22 | wrist, pinky, index, thumb |
//! | Shoulders | 11, 12 | left, right |
//! | Hips | 23, 24 | left, right |
//!
//! These follow the 33-point full-body pose convention and must match the
//! pose source in use.

use crate::error::{PoseDriveError, Result};
use crate::geometry::{average, Point3};

/// Number of landmarks in a full-body pose frame.
pub const LANDMARK_COUNT: usize = 33;

/// Landmark index groups used for feature extraction.
pub mod groups {
    /// Left hand keypoints.
    pub const LEFT_HAND: [usize; 4] = [15, 17, 19, 21];
    /// Right hand keypoints.
    pub const RIGHT_HAND: [usize; 4] = [16, 18, 20, 22];
    /// Left and right shoulder.
    pub const SHOULDERS: [usize; 2] = [11, 12];
    /// Left and right hip.
    pub const HIPS: [usize; 2] = [23, 24];
}

/// A complete frame of pose landmarks.
///
/// Always holds exactly [`LANDMARK_COUNT`] points; construction from a
/// slice of any other length fails.
///
/// # Examples
///
/// ```
/// use pose_drive::geometry::Point3;
/// use pose_drive::pose::LandmarkFrame;
///
/// let frame = LandmarkFrame::from_points(&[Point3::new(0.5, 0.5, 0.0); 33])?;
/// assert_eq!(frame.point(11).x, 0.5);
///
/// assert!(LandmarkFrame::from_points(&[Point3::default(); 20]).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [Point3; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Wraps a full array of landmarks.
    #[must_use]
    pub fn new(points: [Point3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Builds a frame from a slice, checking the landmark count.
    ///
    /// # Errors
    ///
    /// Returns `LandmarkCount` if `points` does not hold exactly 33 entries.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let points: [Point3; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| PoseDriveError::LandmarkCount {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;
        Ok(Self { points })
    }

    /// Returns the landmark at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 33`.
    #[must_use]
    pub fn point(&self, index: usize) -> Point3 {
        self.points[index]
    }

    /// All landmarks in index order.
    #[must_use]
    pub fn points(&self) -> &[Point3; LANDMARK_COUNT] {
        &self.points
    }

    /// Mutable access, used when building synthetic frames.
    pub fn point_mut(&mut self, index: usize) -> &mut Point3 {
        &mut self.points[index]
    }

    /// Averages the landmarks of a named index group.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLandmarkGroup` if `indices` is empty.
    pub fn group_center(&self, name: &'static str, indices: &[usize]) -> Result<Point3> {
        let selected: Vec<Point3> = indices.iter().map(|&i| self.points[i]).collect();
        average(&selected).ok_or(PoseDriveError::EmptyLandmarkGroup(name))
    }
}
