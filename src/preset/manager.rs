//! # Preset Manager
//!
//! Owns every registered preset and tracks which one is active.
//!
//! ## States
//!
//! - **No active preset**: at startup before the first [`PresetManager::apply`],
//!   or after the active preset was unregistered. Callers must apply a
//!   preset again before relying on calibration data.
//! - **Active(P)**: exactly one registered preset is active.
//!
//! ## Notification
//!
//! `apply` hands the newly active preset to every [`PresetListener`] it is
//! given, synchronously and in slice order, before returning. A failed
//! `apply` notifies nobody and changes nothing.
//!
//! ## Usage
//!
//! ```no_run
//! use pose_drive::calibration::CalibrationStore;
//! use pose_drive::preset::{PresetListener, PresetManager, Preset};
//!
//! struct Store(CalibrationStore);
//!
//! impl PresetListener for Store {
//!     fn on_preset_applied(&mut self, preset: &Preset) {
//!         self.0.load_from_mapping(&preset.mapping.named_values());
//!     }
//! }
//!
//! let mut store = Store(CalibrationStore::new());
//! let mut manager = PresetManager::new("presets");
//! manager.load_all("default", &mut [&mut store])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::storage;
use super::Preset;
use crate::error::{PoseDriveError, Result};

/// Name of the built-in preset. It always exists and cannot be removed.
pub const DEFAULT_PRESET: &str = "default";

/// Receives the active preset whenever one is applied.
pub trait PresetListener {
    /// Called synchronously from [`PresetManager::apply`].
    fn on_preset_applied(&mut self, preset: &Preset);
}

/// Registry of presets with a single active entry.
#[derive(Debug)]
pub struct PresetManager {
    presets: BTreeMap<String, Preset>,
    active: Option<String>,
    presets_dir: PathBuf,
}

impl PresetManager {
    /// Creates a manager holding only the built-in `"default"` preset.
    ///
    /// # Arguments
    ///
    /// * `presets_dir` - Directory that `load_all` reads and saves write to
    #[must_use]
    pub fn new<P: AsRef<Path>>(presets_dir: P) -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(DEFAULT_PRESET.to_string(), Preset::default());
        Self {
            presets,
            active: None,
            presets_dir: presets_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory backing this manager.
    #[must_use]
    pub fn presets_dir(&self) -> &Path {
        &self.presets_dir
    }

    /// Inserts or replaces a preset under `name`.
    ///
    /// Replacing the active preset does not re-notify listeners; apply it
    /// again to publish the new values.
    pub fn register(&mut self, name: &str, mut preset: Preset) {
        preset.name = name.to_string();
        self.presets.insert(name.to_string(), preset);
    }

    /// Removes a preset.
    ///
    /// Removing the active preset leaves no preset active.
    ///
    /// # Errors
    ///
    /// Returns `ReservedPreset` for `"default"`.
    pub fn unregister(&mut self, name: &str) -> Result<Option<Preset>> {
        if name == DEFAULT_PRESET {
            return Err(PoseDriveError::ReservedPreset(name.to_string()));
        }

        let removed = self.presets.remove(name);
        if removed.is_some() && self.active.as_deref() == Some(name) {
            warn!("Unregistered active preset '{}', no preset is active", name);
            self.active = None;
        }
        Ok(removed)
    }

    /// Registered preset names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// Looks up a preset.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| PoseDriveError::UnknownPreset(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Name of the active preset, if any.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active preset, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Preset> {
        self.active.as_ref().and_then(|name| self.presets.get(name))
    }

    /// Mutable access to the active preset, for writing edited calibration
    /// back before saving.
    pub fn active_mut(&mut self) -> Option<&mut Preset> {
        let name = self.active.as_ref()?;
        self.presets.get_mut(name)
    }

    /// Makes `name` the active preset and notifies `listeners` in order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` if `name` is not registered; the active
    /// preset is unchanged and no listener is called.
    pub fn apply(&mut self, name: &str, listeners: &mut [&mut dyn PresetListener]) -> Result<()> {
        let Some(preset) = self.presets.get(name) else {
            warn!("Not found preset named {}", name);
            return Err(PoseDriveError::UnknownPreset(name.to_string()));
        };

        for listener in listeners.iter_mut() {
            listener.on_preset_applied(preset);
        }
        self.active = Some(name.to_string());
        info!("Applied preset: {}", name);
        Ok(())
    }

    /// Loads every `*.json` preset from the presets directory, then applies
    /// `default_name` (or `"default"` if that is not registered).
    ///
    /// Unparseable files are logged and skipped. A missing directory loads
    /// nothing.
    ///
    /// # Returns
    ///
    /// Number of presets loaded from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory exists but cannot be listed.
    pub fn load_all(
        &mut self,
        default_name: &str,
        listeners: &mut [&mut dyn PresetListener],
    ) -> Result<usize> {
        let loaded = self.load_dir()?;
        info!("Loaded {} presets", loaded);

        let name = if self.contains(default_name) {
            default_name
        } else {
            warn!("Invalid preset '{}', using {}", default_name, DEFAULT_PRESET);
            DEFAULT_PRESET
        };
        self.apply(name, listeners)?;
        Ok(loaded)
    }

    fn load_dir(&mut self) -> Result<usize> {
        if !self.presets_dir.is_dir() {
            warn!("Preset directory {} not found", self.presets_dir.display());
            return Ok(0);
        }

        let entries = fs::read_dir(&self.presets_dir)?.map(|entry| entry.map(|e| e.path()));
        let paths = preset_paths(entries);

        let mut loaded = 0;
        for path in paths {
            match storage::read_preset(&path) {
                Ok(preset) => {
                    debug!("Loaded preset '{}' from {}", preset.name, path.display());
                    let name = preset.name.clone();
                    self.register(&name, preset);
                    loaded += 1;
                }
                Err(e) => {
                    warn!("Skipping preset {}: {}", path.display(), e);
                }
            }
        }
        Ok(loaded)
    }

    /// Saves the active preset under its own name.
    ///
    /// The built-in `"default"` preset is never overwritten this way; saving
    /// it is a no-op returning `None`.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePreset`, or I/O errors from writing.
    pub fn save_active(&self) -> Result<Option<PathBuf>> {
        let name = self.active_name().ok_or(PoseDriveError::NoActivePreset)?;
        if name == DEFAULT_PRESET {
            debug!("Not saving the built-in default preset");
            return Ok(None);
        }
        self.save_active_as(name).map(Some)
    }

    /// Saves the active preset's tables under `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePreset`, or I/O errors from writing.
    pub fn save_active_as(&self, name: &str) -> Result<PathBuf> {
        let preset = self.active().ok_or(PoseDriveError::NoActivePreset)?;
        let path = storage::write_preset(&self.presets_dir, name, preset)?;
        info!("Saved preset: {}", name);
        Ok(path)
    }
}

/// Preset files among directory entries, sorted for a deterministic load
/// order. Unreadable entries are logged and skipped.
fn preset_paths<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut paths: Vec<PathBuf> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                None
            }
        })
        .filter(|path| storage::is_preset_file(path))
        .collect();
    paths.sort();
    paths
}
