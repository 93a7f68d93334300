//! # Preset Module
//!
//! Named calibration profiles and their lifecycle.
//!
//! A preset bundles two flat tables:
//!
//! - `visual`: display toggles for the renderer (`show_camera_capture`, ...)
//! - `mapping`: calibration scalars for the feature extractor
//!
//! Presets are persisted one JSON file per preset, the file stem being the
//! preset name:
//!
//! ```text
//! {
//!   "visual": { "show_camera_capture": true, "show_pose_estimation": true },
//!   "mapping": { "steering_safe_angle": 7.0, "steering_left_border_angle": 45.0 }
//! }
//! ```

pub mod manager;
pub mod storage;

pub use manager::{PresetListener, PresetManager, DEFAULT_PRESET};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calibration::{CalibrationKey, CalibrationStore};

/// A value in the `visual` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl VisualValue {
    /// Returns the flag value, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VisualValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// The `mapping` table of a preset.
///
/// Entries named after a [`CalibrationKey`] with a numeric value are kept
/// typed. Anything else is carried verbatim in `extra` so that files
/// written by newer versions survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, Value>"
)]
pub struct MappingTable {
    values: BTreeMap<CalibrationKey, f64>,
    extra: BTreeMap<String, Value>,
}

impl Default for MappingTable {
    /// Every known key at its default value.
    fn default() -> Self {
        Self {
            values: CalibrationKey::ALL
                .iter()
                .map(|&key| (key, key.default_value()))
                .collect(),
            extra: BTreeMap::new(),
        }
    }
}

impl MappingTable {
    /// A table with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: CalibrationKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    pub fn set(&mut self, key: CalibrationKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Entries that are not known calibration keys.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// All numeric entries by name, ready for
    /// [`CalibrationStore::load_from_mapping`].
    #[must_use]
    pub fn named_values(&self) -> BTreeMap<String, f64> {
        let known = self
            .values
            .iter()
            .map(|(key, &value)| (key.name().to_string(), value));
        let extra = self
            .extra
            .iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)));
        known.chain(extra).collect()
    }

    /// Copies the current store values back into the table.
    pub fn update_from_store(&mut self, store: &CalibrationStore) {
        for (name, value) in store.dump_to_mapping() {
            match CalibrationKey::from_name(&name) {
                Some(key) => {
                    self.values.insert(key, value);
                }
                None => {
                    self.extra.insert(name, Value::from(value));
                }
            }
        }
    }
}

impl From<BTreeMap<String, Value>> for MappingTable {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut table = MappingTable::empty();
        for (name, value) in raw {
            match (CalibrationKey::from_name(&name), value.as_f64()) {
                (Some(key), Some(v)) => {
                    table.values.insert(key, v);
                }
                _ => {
                    table.extra.insert(name, value);
                }
            }
        }
        table
    }
}

impl From<MappingTable> for BTreeMap<String, Value> {
    fn from(table: MappingTable) -> Self {
        let mut raw = table.extra;
        for (key, value) in table.values {
            raw.insert(key.name().to_string(), Value::from(value));
        }
        raw
    }
}

/// Default visual toggles.
fn default_visual() -> BTreeMap<String, VisualValue> {
    let mut visual = BTreeMap::new();
    visual.insert("show_camera_capture".to_string(), VisualValue::Bool(true));
    visual.insert("show_pose_estimation".to_string(), VisualValue::Bool(true));
    visual
}

/// A named bundle of visual settings and calibration values.
///
/// # Examples
///
/// ```
/// use pose_drive::calibration::CalibrationKey;
/// use pose_drive::preset::Preset;
///
/// let preset = Preset::new("relaxed");
/// assert_eq!(preset.mapping.get(CalibrationKey::SteeringSafeAngle), Some(7.0));
/// assert_eq!(preset.visual_flag("show_camera_capture"), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Preset name; taken from the file stem, never serialized.
    #[serde(skip)]
    pub name: String,

    #[serde(default = "default_visual")]
    pub visual: BTreeMap<String, VisualValue>,

    #[serde(default)]
    pub mapping: MappingTable,
}

impl Default for Preset {
    fn default() -> Self {
        Self::new(DEFAULT_PRESET)
    }
}

impl Preset {
    /// A preset with default visual toggles and default calibration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visual: default_visual(),
            mapping: MappingTable::default(),
        }
    }

    /// Looks up a boolean visual toggle.
    #[must_use]
    pub fn visual_flag(&self, name: &str) -> Option<bool> {
        self.visual.get(name).and_then(VisualValue::as_bool)
    }
}
