//! # Feature Extraction Module
//!
//! Turns one frame of pose landmarks into a [`ControlFeature`] snapshot.
//!
//! ## Steering
//!
//! The player holds an imaginary wheel. The angle of the line between the
//! two hand centers is
//!
//! `angle = atan2(right.x - left.x, right.y - left.y) + steer_angle_offset`
//!
//! wrapped into `(-180, 180]`. Level hands read 0 degrees, a clockwise turn
//! reads positive, a counter-clockwise turn negative.
//!
//! Inside `±steering_safe_angle` both steering pressures are zero. Past it,
//! the excess angle is scaled by the border angle of that side and clamped
//! to `[0, 1]`.
//!
//! ## Throttle and Brake
//!
//! Leaning towards the camera widens the shoulders relative to the hips.
//! The ratio of the two spreads (see [`distance_pow`]) is compared against a
//! calibrated band:
//!
//! ```text
//!  brake <--|            |-- dead band --|            |--> throttle
//!  center - max     center - safe     center + safe     center + max
//! ```
//!
//! Setting one pressure always clears the other, so throttle and brake are
//! never both nonzero.
//!
//! ## Missing Detections
//!
//! A frame with no detection leaves the previous feature untouched. One
//! dropped detection must not snap the controls back to neutral.

use tracing::{debug, trace};

use crate::calibration::{CalibrationStore, MappingParams, MappingValues};
use crate::error::Result;
use crate::geometry::{angle_degrees, clamp_unit, distance_pow, wrap_degrees, Point2};
use crate::pose::{groups, LandmarkFrame};
use crate::preset::{Preset, PresetListener};

/// Features derived from one frame, in display space.
///
/// Points are mirrored horizontally so they line up with the mirrored
/// camera image the player sees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlFeature {
    /// Left hand center, `[0, 1]` display space.
    pub hand_left_center: Point2,
    /// Right hand center, `[0, 1]` display space.
    pub hand_right_center: Point2,
    /// Midpoint of both hands, `[0, 1]` display space.
    pub hands_center: Point2,
    /// Steering wheel angle in degrees, `(-180, 180]`.
    pub steer_angle: f64,
    /// Left steering strength, `[0, 1]`.
    pub left_pressure: f64,
    /// Right steering strength, `[0, 1]`.
    pub right_pressure: f64,
    /// Shoulder to hip spread ratio; 0 when the hips collapse to a point.
    pub spread_ratio: f64,
    /// Brake trigger strength, `[0, 1]`.
    pub brake_pressure: f64,
    /// Throttle trigger strength, `[0, 1]`.
    pub throttle_pressure: f64,
    /// Handbrake gesture; only ever set from outside the extractor.
    pub handbrake_active: bool,
}

impl ControlFeature {
    /// Combined steering axis, `right - left`, in `[-1, 1]`.
    #[must_use]
    pub fn steer_axis(&self) -> f64 {
        self.right_pressure - self.left_pressure
    }
}

/// Scales how far `excess` reaches into `range`, clamped to `[0, 1]`.
///
/// Non-positive excess is zero. A zero-width range saturates immediately;
/// an inverted range (max below safe) never engages.
#[inline]
fn normalize_excess(excess: f64, range: f64) -> f64 {
    if excess.is_nan() || excess <= 0.0 || range < 0.0 {
        0.0
    } else if range == 0.0 {
        1.0
    } else {
        clamp_unit(excess / range)
    }
}

/// Left and right steering pressures for an angle.
fn steering_pressures(angle: f64, values: &MappingValues) -> (f64, f64) {
    let safe = values.steering_safe_angle;
    if angle < 0.0 {
        (normalize_excess(-angle - safe, values.steering_left_border_angle), 0.0)
    } else if angle > 0.0 {
        (0.0, normalize_excess(angle - safe, values.steering_right_border_angle))
    } else {
        (0.0, 0.0)
    }
}

/// Brake and throttle pressures for a spread ratio.
fn pedal_pressures(ratio: f64, values: &MappingValues) -> (f64, f64) {
    let center = values.throttle_ratio_center;
    let safe = values.throttle_ratio_safe_dist;
    let range = values.throttle_ratio_max_dist - safe;
    let throttle_thresh = center + safe;
    let brake_thresh = center - safe;

    if ratio >= throttle_thresh {
        (0.0, normalize_excess(ratio - throttle_thresh, range))
    } else if ratio <= brake_thresh {
        (normalize_excess(brake_thresh - ratio, range), 0.0)
    } else {
        (0.0, 0.0)
    }
}

/// Extracts control features from landmark frames.
///
/// Owns the calibration store the mapping reads from. The store is
/// refreshed whenever a preset is applied (see [`PresetListener`]).
///
/// # Examples
///
/// ```
/// use pose_drive::controller::feature::FeatureExtractor;
///
/// let mut extractor = FeatureExtractor::new();
///
/// // No detection: the previous (neutral) feature is held
/// let feature = extractor.extract(None)?;
/// assert_eq!(feature.steer_angle, 0.0);
/// assert_eq!(extractor.held_frames(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    /// Last successfully extracted feature.
    last_good: ControlFeature,
    store: CalibrationStore,
    params: MappingParams,
    held_frames: u64,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// Creates an extractor with every calibration key at its default.
    #[must_use]
    pub fn new() -> Self {
        let mut store = CalibrationStore::new();
        let params = MappingParams::register(&mut store);
        Self {
            last_good: ControlFeature::default(),
            store,
            params,
            held_frames: 0,
        }
    }

    /// The current feature snapshot, for renderers.
    #[must_use]
    pub fn feature(&self) -> &ControlFeature {
        &self.last_good
    }

    /// Consecutive frames without a detection.
    #[must_use]
    pub fn held_frames(&self) -> u64 {
        self.held_frames
    }

    /// Calibration values read by the mapping.
    #[must_use]
    pub fn calibration(&self) -> &CalibrationStore {
        &self.store
    }

    /// Mutable calibration access for live tuning. Edits take effect on the
    /// next extracted frame.
    pub fn calibration_mut(&mut self) -> &mut CalibrationStore {
        &mut self.store
    }

    /// Handles of the known calibration keys.
    #[must_use]
    pub fn params(&self) -> &MappingParams {
        &self.params
    }

    /// Sets the handbrake flag carried by the feature.
    pub fn set_handbrake(&mut self, active: bool) {
        self.last_good.handbrake_active = active;
    }

    /// Updates the feature from a frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - Landmarks for this frame, or `None` if nothing was detected
    ///
    /// # Returns
    ///
    /// The updated feature, or the previous one unchanged when `frame` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLandmarkGroup` if an index group is empty. The previous
    /// feature is kept in that case.
    pub fn extract(&mut self, frame: Option<&LandmarkFrame>) -> Result<&ControlFeature> {
        match frame {
            None => {
                self.held_frames += 1;
                debug!(held_frames = self.held_frames, "No detection, holding last feature");
            }
            Some(frame) => {
                let values = self.params.read(&self.store);
                self.last_good = Self::compute(frame, &values, &self.last_good)?;
                self.held_frames = 0;
            }
        }
        Ok(&self.last_good)
    }

    fn compute(
        frame: &LandmarkFrame,
        values: &MappingValues,
        previous: &ControlFeature,
    ) -> Result<ControlFeature> {
        let left = frame.group_center("left hand", &groups::LEFT_HAND)?.xy();
        let right = frame.group_center("right hand", &groups::RIGHT_HAND)?.xy();

        let (dx, dy) = (right.x - left.x, right.y - left.y);
        // Coincident hands have no direction; keep the previous steering
        let (steer_angle, left_pressure, right_pressure) = if dx == 0.0 && dy == 0.0 {
            trace!("Hand centers coincide, holding steering");
            (previous.steer_angle, previous.left_pressure, previous.right_pressure)
        } else {
            let angle = wrap_degrees(angle_degrees(dx, dy) + values.steer_angle_offset);
            let (left_pressure, right_pressure) = steering_pressures(angle, values);
            (angle, left_pressure, right_pressure)
        };

        let e = values.spread_exponent;
        let shoulders = distance_pow(
            frame.point(groups::SHOULDERS[0]).xy(),
            frame.point(groups::SHOULDERS[1]).xy(),
            e,
        );
        let hips = distance_pow(
            frame.point(groups::HIPS[0]).xy(),
            frame.point(groups::HIPS[1]).xy(),
            e,
        );

        let (spread_ratio, brake_pressure, throttle_pressure) = if hips > 0.0 {
            let ratio = shoulders / hips;
            let (brake, throttle) = pedal_pressures(ratio, values);
            (ratio, brake, throttle)
        } else {
            trace!("Hip spread is zero, pedals neutral");
            (0.0, 0.0, 0.0)
        };

        Ok(ControlFeature {
            hand_left_center: left.mirrored(),
            hand_right_center: right.mirrored(),
            hands_center: left.midpoint(&right).mirrored(),
            steer_angle,
            left_pressure,
            right_pressure,
            spread_ratio,
            brake_pressure,
            throttle_pressure,
            handbrake_active: previous.handbrake_active,
        })
    }
}

impl PresetListener for FeatureExtractor {
    fn on_preset_applied(&mut self, preset: &Preset) {
        self.store.load_from_mapping(&preset.mapping.named_values());
        debug!("Calibration reloaded from preset '{}'", preset.name);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::calibration::CalibrationKey;
    use crate::geometry::Point3;
    use crate::pose::LANDMARK_COUNT;

    /// Builds a frame with the given raw (unmirrored) hand centers and a
    /// torso whose fourth-power spread ratio is `ratio`.
    pub(crate) fn make_frame(left: (f64, f64), right: (f64, f64), ratio: f64) -> LandmarkFrame {
        let mut frame = LandmarkFrame::new([Point3::new(0.5, 0.5, 0.0); LANDMARK_COUNT]);
        for &i in &groups::LEFT_HAND {
            *frame.point_mut(i) = Point3::new(left.0, left.1, 0.0);
        }
        for &i in &groups::RIGHT_HAND {
            *frame.point_mut(i) = Point3::new(right.0, right.1, 0.0);
        }

        let hip_half = 0.05;
        let shoulder_half = hip_half * ratio.powf(0.25);
        *frame.point_mut(groups::HIPS[0]) = Point3::new(0.5 + hip_half, 0.8, 0.0);
        *frame.point_mut(groups::HIPS[1]) = Point3::new(0.5 - hip_half, 0.8, 0.0);
        *frame.point_mut(groups::SHOULDERS[0]) = Point3::new(0.5 + shoulder_half, 0.4, 0.0);
        *frame.point_mut(groups::SHOULDERS[1]) = Point3::new(0.5 - shoulder_half, 0.4, 0.0);
        frame
    }

    const LEVEL_LEFT: (f64, f64) = (0.7, 0.5);
    const LEVEL_RIGHT: (f64, f64) = (0.3, 0.5);
    const NEUTRAL_RATIO: f64 = 6.0;

    // ==================== Hand Center Tests ====================

    #[test]
    fn test_hand_centers_mirrored() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!((f.hand_left_center.x - 0.3).abs() < 1e-12);
        assert!((f.hand_left_center.y - 0.5).abs() < 1e-12);
        assert!((f.hand_right_center.x - 0.7).abs() < 1e-12);
        assert!((f.hands_center.x - 0.5).abs() < 1e-12);
        assert!((f.hands_center.y - 0.5).abs() < 1e-12);
    }

    // ==================== Steering Tests ====================

    #[test]
    fn test_level_hands_zero_angle() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!(f.steer_angle.abs() < 1e-9);
        assert_eq!(f.left_pressure, 0.0);
        assert_eq!(f.right_pressure, 0.0);
    }

    #[test]
    fn test_clockwise_turn_steers_right() {
        let mut extractor = FeatureExtractor::new();
        // Right hand drops below the left one
        let frame = make_frame((0.7, 0.4), (0.3, 0.6), NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        let expected_angle = (-0.4_f64).atan2(0.2).to_degrees() + 90.0;
        assert!((f.steer_angle - expected_angle).abs() < 1e-9);
        assert!(f.steer_angle > 0.0);
        assert!((f.right_pressure - (expected_angle - 7.0) / 45.0).abs() < 1e-9);
        assert_eq!(f.left_pressure, 0.0);
    }

    #[test]
    fn test_counter_clockwise_turn_steers_left() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame((0.7, 0.6), (0.3, 0.4), NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!(f.steer_angle < 0.0);
        assert!(f.left_pressure > 0.0);
        assert_eq!(f.right_pressure, 0.0);
        assert!(f.steer_axis() < 0.0);
    }

    #[test]
    fn test_ninety_degrees_saturates_right() {
        let mut extractor = FeatureExtractor::new();
        // Hands stacked vertically, right hand below
        let frame = make_frame((0.5, 0.3), (0.5, 0.7), NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!((f.steer_angle - 90.0).abs() < 1e-9);
        // clamp01((90 - 7) / 45) = 1.0
        assert_eq!(f.right_pressure, 1.0);
        assert_eq!(f.left_pressure, 0.0);
    }

    #[test]
    fn test_dead_zone_zero_pressure() {
        let values = MappingValues::default();
        let mut angle = -values.steering_safe_angle;
        while angle <= values.steering_safe_angle {
            let (left, right) = steering_pressures(angle, &values);
            assert_eq!(left, 0.0, "left pressure nonzero at {}", angle);
            assert_eq!(right, 0.0, "right pressure nonzero at {}", angle);
            angle += 0.25;
        }
    }

    #[test]
    fn test_steering_sides_exclusive() {
        let values = MappingValues::default();
        for step in -180..=180 {
            let (left, right) = steering_pressures(step as f64, &values);
            assert!(left == 0.0 || right == 0.0, "both sides at {}", step);
        }
    }

    #[test]
    fn test_zero_border_saturates() {
        let values = MappingValues {
            steering_right_border_angle: 0.0,
            ..MappingValues::default()
        };
        assert_eq!(steering_pressures(8.0, &values), (0.0, 1.0));
        assert_eq!(steering_pressures(7.0, &values), (0.0, 0.0));
    }

    #[test]
    fn test_inverted_pedal_range_never_engages() {
        // max_dist below safe_dist leaves a negative range
        let values = MappingValues {
            throttle_ratio_safe_dist: 0.6,
            throttle_ratio_max_dist: 0.5,
            ..MappingValues::default()
        };
        assert_eq!(pedal_pressures(20.0, &values), (0.0, 0.0));
        assert_eq!(pedal_pressures(0.5, &values), (0.0, 0.0));
    }

    #[test]
    fn test_angle_offset_is_tunable() {
        let mut extractor = FeatureExtractor::new();
        let id = extractor.params().id(CalibrationKey::SteerAngleOffset);
        extractor.calibration_mut().set(id, 0.0);

        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        // atan2(-0.4, 0) without the 90 degree offset
        assert!((f.steer_angle + 90.0).abs() < 1e-9);
        assert_eq!(f.left_pressure, 1.0);
        assert_eq!(f.right_pressure, 0.0);
    }

    #[test]
    fn test_spread_exponent_is_tunable() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, 16.0);
        let f = *extractor.extract(Some(&frame)).unwrap();
        assert!((f.spread_ratio - 16.0).abs() < 1e-9);
        assert_eq!(f.throttle_pressure, 1.0);

        let id = extractor.params().id(CalibrationKey::SpreadExponent);
        extractor.calibration_mut().set(id, 2.0);
        let f = *extractor.extract(Some(&frame)).unwrap();

        // Shoulders 0.2 apart, hips 0.1 apart: (0.2^2 / 2) / (0.1^2 / 2) = 4
        assert!((f.spread_ratio - 4.0).abs() < 1e-9);
        // 4.0 is below center - safe (5.4) by 1.4, a full range
        assert!((f.brake_pressure - 1.0).abs() < 1e-9);
        assert_eq!(f.throttle_pressure, 0.0);
    }

    #[test]
    fn test_coincident_hands_hold_steering() {
        let mut extractor = FeatureExtractor::new();
        let turned = make_frame((0.7, 0.6), (0.3, 0.4), NEUTRAL_RATIO);
        let before = *extractor.extract(Some(&turned)).unwrap();
        assert!(before.left_pressure > 0.0);

        let together = make_frame((0.5, 0.5), (0.5, 0.5), 9.0);
        let f = *extractor.extract(Some(&together)).unwrap();

        assert_eq!(f.steer_angle, before.steer_angle);
        assert_eq!(f.left_pressure, before.left_pressure);
        assert_eq!(f.right_pressure, 0.0);
        // Pedals and hand centers still update
        assert!(f.throttle_pressure > 0.0);
        assert!((f.hands_center.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_crossed_hands_wrap_angle() {
        let mut extractor = FeatureExtractor::new();
        // Hands crossed over: atan2 gives ~97 degrees, plus the offset passes 180
        let frame = make_frame((0.3, 0.5), (0.7, 0.45), NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        let raw = 0.4_f64.atan2(-0.05).to_degrees() + 90.0;
        assert!(raw > 180.0);
        assert!((f.steer_angle - (raw - 360.0)).abs() < 1e-9);
        assert_eq!(f.left_pressure, 1.0);
        assert_eq!(f.right_pressure, 0.0);
    }

    // ==================== Pedal Tests ====================

    #[test]
    fn test_neutral_ratio_no_pedals() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!((f.spread_ratio - NEUTRAL_RATIO).abs() < 1e-6);
        assert_eq!(f.throttle_pressure, 0.0);
        assert_eq!(f.brake_pressure, 0.0);
    }

    #[test]
    fn test_lean_forward_throttles() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, 7.6);
        let f = *extractor.extract(Some(&frame)).unwrap();

        // (7.6 - 6.6) / (2.0 - 0.6)
        assert!((f.throttle_pressure - 1.0 / 1.4).abs() < 1e-6);
        assert_eq!(f.brake_pressure, 0.0);
    }

    #[test]
    fn test_lean_back_brakes() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, 4.4);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert!((f.brake_pressure - 1.0 / 1.4).abs() < 1e-6);
        assert_eq!(f.throttle_pressure, 0.0);
    }

    #[test]
    fn test_pedals_saturate() {
        let mut extractor = FeatureExtractor::new();
        let f = *extractor.extract(Some(&make_frame(LEVEL_LEFT, LEVEL_RIGHT, 20.0))).unwrap();
        assert_eq!(f.throttle_pressure, 1.0);

        let f = *extractor.extract(Some(&make_frame(LEVEL_LEFT, LEVEL_RIGHT, 0.5))).unwrap();
        assert_eq!(f.brake_pressure, 1.0);
        assert_eq!(f.throttle_pressure, 0.0);
    }

    #[test]
    fn test_throttle_then_brake_clears_throttle() {
        let mut extractor = FeatureExtractor::new();
        extractor.extract(Some(&make_frame(LEVEL_LEFT, LEVEL_RIGHT, 9.0))).unwrap();
        let f = *extractor.extract(Some(&make_frame(LEVEL_LEFT, LEVEL_RIGHT, 3.0))).unwrap();
        assert!(f.brake_pressure > 0.0);
        assert_eq!(f.throttle_pressure, 0.0);

        let f = *extractor.extract(Some(&make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO))).unwrap();
        assert_eq!(f.brake_pressure, 0.0);
        assert_eq!(f.throttle_pressure, 0.0);
    }

    #[test]
    fn test_pedals_never_both_pressed() {
        let mut extractor = FeatureExtractor::new();
        for step in 0..200 {
            let ratio = step as f64 * 0.075;
            let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, ratio);
            let f = *extractor.extract(Some(&frame)).unwrap();
            assert!(
                f.brake_pressure == 0.0 || f.throttle_pressure == 0.0,
                "both pedals pressed at ratio {}",
                ratio
            );
        }
    }

    #[test]
    fn test_collapsed_hips_neutral_pedals() {
        let mut extractor = FeatureExtractor::new();
        let mut frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, 9.0);
        *frame.point_mut(groups::HIPS[1]) = frame.point(groups::HIPS[0]);
        let f = *extractor.extract(Some(&frame)).unwrap();

        assert_eq!(f.spread_ratio, 0.0);
        assert_eq!(f.throttle_pressure, 0.0);
        assert_eq!(f.brake_pressure, 0.0);
    }

    // ==================== Hold / Calibration Tests ====================

    #[test]
    fn test_missing_detection_holds_feature() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame((0.7, 0.4), (0.3, 0.6), 8.0);
        let before = *extractor.extract(Some(&frame)).unwrap();

        let held = *extractor.extract(None).unwrap();
        assert_eq!(held, before);
        let held = *extractor.extract(None).unwrap();
        assert_eq!(held, before);
        assert_eq!(extractor.held_frames(), 2);

        extractor.extract(Some(&frame)).unwrap();
        assert_eq!(extractor.held_frames(), 0);
    }

    #[test]
    fn test_live_calibration_edit() {
        let mut extractor = FeatureExtractor::new();
        let frame = make_frame((0.7, 0.4), (0.3, 0.6), NEUTRAL_RATIO);
        assert!(extractor.extract(Some(&frame)).unwrap().right_pressure > 0.0);

        let id = extractor.params().id(CalibrationKey::SteeringSafeAngle);
        extractor.calibration_mut().set(id, 30.0);
        assert_eq!(extractor.extract(Some(&frame)).unwrap().right_pressure, 0.0);
    }

    #[test]
    fn test_preset_applied_reloads_calibration() {
        let mut extractor = FeatureExtractor::new();
        let mut preset = Preset::new("wide");
        preset.mapping.set(CalibrationKey::SteeringSafeAngle, 28.0);
        preset.mapping.set(CalibrationKey::ThrottleRatioCenter, 50.0);

        extractor.on_preset_applied(&preset);

        let id = extractor.params().id(CalibrationKey::SteeringSafeAngle);
        assert_eq!(extractor.calibration().get(id), 28.0);
        // 50.0 is clamped to the 0-9 range
        let center = extractor.params().id(CalibrationKey::ThrottleRatioCenter);
        assert_eq!(extractor.calibration().get(center), 9.0);
    }

    #[test]
    fn test_handbrake_flag_survives_frames() {
        let mut extractor = FeatureExtractor::new();
        extractor.set_handbrake(true);
        let frame = make_frame(LEVEL_LEFT, LEVEL_RIGHT, NEUTRAL_RATIO);
        assert!(extractor.extract(Some(&frame)).unwrap().handbrake_active);

        extractor.set_handbrake(false);
        assert!(!extractor.extract(Some(&frame)).unwrap().handbrake_active);
    }
}
