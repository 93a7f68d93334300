//! # Calibration Module
//!
//! Named, bounded scalar parameters that tune the pose-to-control mapping.
//!
//! ## Parameters
//!
//! Every parameter has a value and a `[min, max]` range. Assignments outside
//! the range are clamped silently, so slider rounding in a calibration UI
//! never produces an error.
//!
//! Registration hands back a [`ParamId`]. Reading through the id always
//! returns the current value, so later edits are seen without
//! re-registering.
//!
//! ## Known Keys
//!
//! | Key | Default | Range | Meaning |
//! |-----|---------|-------|---------|
//! | `steering_safe_angle` | 7 | 0-30 | Dead-zone around level hands (degrees) |
//! | `steering_left_border_angle` | 45 | 0-80 | Angle past the dead-zone for full left |
//! | `steering_right_border_angle` | 45 | 0-80 | Angle past the dead-zone for full right |
//! | `throttle_ratio_center` | 6 | 0-9 | Neutral shoulder/hip spread ratio |
//! | `throttle_ratio_safe_dist` | 0.6 | 0-2 | Dead band around the neutral ratio |
//! | `throttle_ratio_max_dist` | 2 | 0-5 | Ratio offset for full throttle/brake |
//! | `spread_exponent` | 4 | 1-8 | Exponent of the spread measure |
//! | `steer_angle_offset` | 90 | -180-180 | Offset making level hands read 0 degrees |
//!
//! ## Usage
//!
//! ```
//! use pose_drive::calibration::CalibrationStore;
//!
//! let mut store = CalibrationStore::new();
//! let gain = store.scalar("gain", 1.0, 0.0, 2.0);
//!
//! store.set(gain, 5.0);
//! assert_eq!(store.get(gain), 2.0); // clamped
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Calibration keys understood by the feature extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationKey {
    SteeringSafeAngle,
    SteeringLeftBorderAngle,
    SteeringRightBorderAngle,
    ThrottleRatioCenter,
    ThrottleRatioSafeDist,
    ThrottleRatioMaxDist,
    SpreadExponent,
    SteerAngleOffset,
}

impl CalibrationKey {
    /// Number of known keys.
    pub const COUNT: usize = 8;

    /// All known keys, in registration order.
    pub const ALL: [CalibrationKey; Self::COUNT] = [
        CalibrationKey::SteeringSafeAngle,
        CalibrationKey::SteeringLeftBorderAngle,
        CalibrationKey::SteeringRightBorderAngle,
        CalibrationKey::ThrottleRatioCenter,
        CalibrationKey::ThrottleRatioSafeDist,
        CalibrationKey::ThrottleRatioMaxDist,
        CalibrationKey::SpreadExponent,
        CalibrationKey::SteerAngleOffset,
    ];

    /// Looks up a key by its persisted name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Persisted name of the key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CalibrationKey::SteeringSafeAngle => "steering_safe_angle",
            CalibrationKey::SteeringLeftBorderAngle => "steering_left_border_angle",
            CalibrationKey::SteeringRightBorderAngle => "steering_right_border_angle",
            CalibrationKey::ThrottleRatioCenter => "throttle_ratio_center",
            CalibrationKey::ThrottleRatioSafeDist => "throttle_ratio_safe_dist",
            CalibrationKey::ThrottleRatioMaxDist => "throttle_ratio_max_dist",
            CalibrationKey::SpreadExponent => "spread_exponent",
            CalibrationKey::SteerAngleOffset => "steer_angle_offset",
        }
    }

    /// `(default, min, max)` for the key.
    #[must_use]
    pub fn bounds(self) -> (f64, f64, f64) {
        match self {
            CalibrationKey::SteeringSafeAngle => (7.0, 0.0, 30.0),
            CalibrationKey::SteeringLeftBorderAngle => (45.0, 0.0, 80.0),
            CalibrationKey::SteeringRightBorderAngle => (45.0, 0.0, 80.0),
            CalibrationKey::ThrottleRatioCenter => (6.0, 0.0, 9.0),
            CalibrationKey::ThrottleRatioSafeDist => (0.6, 0.0, 2.0),
            CalibrationKey::ThrottleRatioMaxDist => (2.0, 0.0, 5.0),
            CalibrationKey::SpreadExponent => (4.0, 1.0, 8.0),
            CalibrationKey::SteerAngleOffset => (90.0, -180.0, 180.0),
        }
    }

    /// Default value of the key.
    #[must_use]
    pub fn default_value(self) -> f64 {
        self.bounds().0
    }
}

impl fmt::Display for CalibrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// A named scalar with bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationParameter {
    name: String,
    value: f64,
    min: f64,
    max: f64,
}

impl CalibrationParameter {
    /// Creates a parameter; `default` is clamped to the bounds.
    ///
    /// Reversed bounds are swapped.
    #[must_use]
    pub fn new(name: impl Into<String>, default: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut param = Self {
            name: name.into(),
            value: min,
            min,
            max,
        };
        param.set(default);
        param
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Assigns a value clamped to `[min, max]` and returns the stored value.
    ///
    /// NaN is ignored and the previous value kept.
    pub fn set(&mut self, value: f64) -> f64 {
        if !value.is_nan() {
            self.value = value.clamp(self.min, self.max);
        }
        self.value
    }
}

/// Handle to a registered parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(usize);

/// Registry of calibration parameters.
///
/// Values change only through explicit calls (`set`, `load_from_mapping`);
/// nothing is published to dependents automatically. Applying a preset is
/// what pushes new values out.
#[derive(Debug, Clone, Default)]
pub struct CalibrationStore {
    params: Vec<CalibrationParameter>,
    index: HashMap<String, ParamId>,
}

impl CalibrationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bounded scalar, or returns the existing handle if the
    /// name is already registered.
    ///
    /// An existing parameter keeps its current value and bounds.
    pub fn scalar(&mut self, name: &str, default: f64, min: f64, max: f64) -> ParamId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        let id = ParamId(self.params.len());
        self.params.push(CalibrationParameter::new(name, default, min, max));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Looks up a handle by name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<ParamId> {
        self.index.get(name).copied()
    }

    /// Current value behind a handle.
    #[must_use]
    pub fn get(&self, id: ParamId) -> f64 {
        self.params[id.0].value()
    }

    /// The full parameter behind a handle.
    #[must_use]
    pub fn param(&self, id: ParamId) -> &CalibrationParameter {
        &self.params[id.0]
    }

    /// Assigns a clamped value, returning what was stored.
    pub fn set(&mut self, id: ParamId, value: f64) -> f64 {
        self.params[id.0].set(value)
    }

    /// Assigns a clamped value by name. Unknown names return `None`.
    pub fn set_by_name(&mut self, name: &str, value: f64) -> Option<f64> {
        let id = self.id(name)?;
        Some(self.set(id, value))
    }

    /// Bulk-applies named values.
    ///
    /// Unknown names are ignored; registered names absent from `values`
    /// keep their current value.
    pub fn load_from_mapping(&mut self, values: &BTreeMap<String, f64>) {
        for (name, &value) in values {
            self.set_by_name(name, value);
        }
    }

    /// Snapshot of every registered value by name.
    #[must_use]
    pub fn dump_to_mapping(&self) -> BTreeMap<String, f64> {
        self.params
            .iter()
            .map(|p| (p.name().to_string(), p.value()))
            .collect()
    }

    /// Iterates registered parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CalibrationParameter> {
        self.params.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Values of every [`CalibrationKey`], read out of a store for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingValues {
    pub steering_safe_angle: f64,
    pub steering_left_border_angle: f64,
    pub steering_right_border_angle: f64,
    pub throttle_ratio_center: f64,
    pub throttle_ratio_safe_dist: f64,
    pub throttle_ratio_max_dist: f64,
    pub spread_exponent: f64,
    pub steer_angle_offset: f64,
}

impl Default for MappingValues {
    fn default() -> Self {
        Self {
            steering_safe_angle: CalibrationKey::SteeringSafeAngle.default_value(),
            steering_left_border_angle: CalibrationKey::SteeringLeftBorderAngle.default_value(),
            steering_right_border_angle: CalibrationKey::SteeringRightBorderAngle.default_value(),
            throttle_ratio_center: CalibrationKey::ThrottleRatioCenter.default_value(),
            throttle_ratio_safe_dist: CalibrationKey::ThrottleRatioSafeDist.default_value(),
            throttle_ratio_max_dist: CalibrationKey::ThrottleRatioMaxDist.default_value(),
            spread_exponent: CalibrationKey::SpreadExponent.default_value(),
            steer_angle_offset: CalibrationKey::SteerAngleOffset.default_value(),
        }
    }
}

/// Handles for every [`CalibrationKey`] in one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingParams {
    ids: [ParamId; CalibrationKey::COUNT],
}

impl MappingParams {
    /// Registers all known keys with their defaults and bounds.
    pub fn register(store: &mut CalibrationStore) -> Self {
        let ids = CalibrationKey::ALL.map(|key| {
            let (default, min, max) = key.bounds();
            store.scalar(key.name(), default, min, max)
        });
        Self { ids }
    }

    /// Handle of a known key.
    #[must_use]
    pub fn id(&self, key: CalibrationKey) -> ParamId {
        self.ids[key as usize]
    }

    /// Reads the current values through the store.
    #[must_use]
    pub fn read(&self, store: &CalibrationStore) -> MappingValues {
        let get = |key| store.get(self.id(key));
        MappingValues {
            steering_safe_angle: get(CalibrationKey::SteeringSafeAngle),
            steering_left_border_angle: get(CalibrationKey::SteeringLeftBorderAngle),
            steering_right_border_angle: get(CalibrationKey::SteeringRightBorderAngle),
            throttle_ratio_center: get(CalibrationKey::ThrottleRatioCenter),
            throttle_ratio_safe_dist: get(CalibrationKey::ThrottleRatioSafeDist),
            throttle_ratio_max_dist: get(CalibrationKey::ThrottleRatioMaxDist),
            spread_exponent: get(CalibrationKey::SpreadExponent),
            steer_angle_offset: get(CalibrationKey::SteerAngleOffset),
        }
    }
}
