//! # Geometry Module
//!
//! Small helpers over normalized landmark coordinates.
//!
//! All landmark coordinates live in `[0, 1]` image space with `y` pointing
//! down. Angles are always reported in degrees.

use serde::{Deserialize, Serialize};

/// A point in normalized 3D landmark space (`z` is depth relative to the hips).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drops the depth component.
    #[must_use]
    pub fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A point in normalized 2D display space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirrors the point horizontally (`x -> 1 - x`).
    ///
    /// The camera image is shown mirrored to the player, so every point
    /// handed to a renderer goes through this.
    ///
    /// # Examples
    ///
    /// ```
    /// use pose_drive::geometry::Point2;
    ///
    /// let p = Point2::new(0.7, 0.5).mirrored();
    /// assert!((p.x - 0.3).abs() < 1e-12);
    /// assert_eq!(p.y, 0.5);
    /// ```
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self::new(1.0 - self.x, self.y)
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(&self, other: &Point2) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Arithmetic mean of a set of points, per component.
///
/// Returns `None` for an empty slice; callers turn that into an error
/// rather than letting NaN flow downstream.
///
/// # Examples
///
/// ```
/// use pose_drive::geometry::{average, Point3};
///
/// let avg = average(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.2)]).unwrap();
/// assert_eq!(avg, Point3::new(0.5, 0.25, 0.1));
/// assert!(average(&[]).is_none());
/// ```
#[must_use]
pub fn average(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let sum = points.iter().fold(Point3::default(), |acc, p| {
        Point3::new(acc.x + p.x, acc.y + p.y, acc.z + p.z)
    });
    Some(Point3::new(sum.x / n, sum.y / n, sum.z / n))
}

/// Clamps a value to `[0, 1]`.
///
/// NaN maps to `1.0`, matching `max(0, min(1, x))`.
#[must_use]
pub fn clamp_unit(x: f64) -> f64 {
    0.0_f64.max(1.0_f64.min(x))
}

/// Power-weighted spread between two points: `(|dx|^e + |dy|^e) / e`.
///
/// Not a metric. Callers only rely on it growing with separation, and a
/// larger exponent exaggerates the dominant axis. Absolute differences keep
/// fractional exponents well defined.
///
/// # Examples
///
/// ```
/// use pose_drive::geometry::{distance_pow, Point2};
///
/// let d = distance_pow(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), 4.0);
/// assert!((d - 4.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn distance_pow(p1: Point2, p2: Point2, e: f64) -> f64 {
    ((p1.x - p2.x).abs().powf(e) + (p1.y - p2.y).abs().powf(e)) / e
}

/// Euclidean distance between two 2D points.
#[must_use]
pub fn distance(p1: Point2, p2: Point2) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// `atan2(dx, dy)` in degrees, as used for the steering wheel angle.
///
/// Note the argument order: zero degrees points along `+y`.
#[must_use]
pub fn angle_degrees(dx: f64, dy: f64) -> f64 {
    dx.atan2(dy).to_degrees()
}

/// Wraps an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
