//! # Pipeline
//!
//! Wires the preset manager, feature extractor and control trigger into a
//! single per-frame call.
//!
//! ```text
//! LandmarkFrame ──> FeatureExtractor ──> ControlFeature ──> ControlTrigger ──> ControllerSink
//!                        ^
//!                        │ on_preset_applied
//!                   PresetManager
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::controller::{Button, ControlFeature, ControlTrigger, ControllerSink, FeatureExtractor};
use crate::error::{PoseDriveError, Result};
use crate::pose::LandmarkFrame;
use crate::preset::PresetManager;

/// The complete pose to controller pipeline.
///
/// # Examples
///
/// ```
/// use pose_drive::controller::{Button, LoggingSink};
/// use pose_drive::pipeline::PoseDrive;
///
/// let mut drive = PoseDrive::new("presets", Button::A);
/// drive.apply_preset("default")?;
///
/// let mut sink = LoggingSink::new();
/// let feature = drive.process_frame(None, &mut sink)?;
/// assert_eq!(feature.steer_axis(), 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PoseDrive {
    presets: PresetManager,
    extractor: FeatureExtractor,
    trigger: ControlTrigger,
    frames: u64,
}

impl PoseDrive {
    /// Creates a pipeline with no active preset.
    ///
    /// # Arguments
    ///
    /// * `presets_dir` - Directory presets are loaded from and saved to
    /// * `handbrake_button` - Pad button driven by the handbrake gesture
    #[must_use]
    pub fn new<P: AsRef<Path>>(presets_dir: P, handbrake_button: Button) -> Self {
        Self {
            presets: PresetManager::new(presets_dir),
            extractor: FeatureExtractor::new(),
            trigger: ControlTrigger::new(handbrake_button),
            frames: 0,
        }
    }

    #[must_use]
    pub fn presets(&self) -> &PresetManager {
        &self.presets
    }

    /// Direct registry access. Use [`PoseDrive::apply_preset`] to activate a
    /// preset so the extractor is notified.
    pub fn presets_mut(&mut self) -> &mut PresetManager {
        &mut self.presets
    }

    #[must_use]
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn extractor_mut(&mut self) -> &mut FeatureExtractor {
        &mut self.extractor
    }

    /// The feature produced by the most recent frame.
    #[must_use]
    pub fn feature(&self) -> &ControlFeature {
        self.extractor.feature()
    }

    /// Frames processed so far.
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Activates a preset and reloads the calibration from it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` if `name` is not registered.
    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        self.presets.apply(name, &mut [&mut self.extractor])
    }

    /// Loads presets from disk and applies `default_name`.
    ///
    /// # Returns
    ///
    /// Number of presets read from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the presets directory cannot be listed.
    pub fn load_presets(&mut self, default_name: &str) -> Result<usize> {
        self.presets.load_all(default_name, &mut [&mut self.extractor])
    }

    /// Sets the handbrake gesture state for the following frames.
    pub fn set_handbrake(&mut self, active: bool) {
        self.extractor.set_handbrake(active);
    }

    /// Runs one frame: extracts features and drives the sink.
    ///
    /// # Arguments
    ///
    /// * `frame` - Landmarks for this frame, `None` if nothing was detected
    /// * `sink` - Receiver of axis values and button edges
    ///
    /// # Returns
    ///
    /// The feature written to the sink.
    ///
    /// # Errors
    ///
    /// - `NoActivePreset` if no preset has been applied
    /// - `EmptyLandmarkGroup` from feature extraction
    pub fn process_frame(
        &mut self,
        frame: Option<&LandmarkFrame>,
        sink: &mut dyn ControllerSink,
    ) -> Result<ControlFeature> {
        if self.presets.active_name().is_none() {
            return Err(PoseDriveError::NoActivePreset);
        }

        let feature = *self.extractor.extract(frame)?;
        self.trigger.trigger(&feature, sink);
        self.frames += 1;
        Ok(feature)
    }

    /// Releases held buttons and centers the axes.
    pub fn release_all(&mut self, sink: &mut dyn ControllerSink) {
        self.trigger.release_all(sink);
    }

    /// Copies live calibration edits into the active preset.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePreset` if no preset is active.
    pub fn sync_calibration_to_preset(&mut self) -> Result<()> {
        let preset = self.presets.active_mut().ok_or(PoseDriveError::NoActivePreset)?;
        preset.mapping.update_from_store(self.extractor.calibration());
        debug!("Synced calibration into preset '{}'", preset.name);
        Ok(())
    }

    /// Syncs calibration and saves the active preset under its own name.
    ///
    /// # Returns
    ///
    /// The written path, or `None` for the built-in default preset.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePreset` or I/O errors.
    pub fn save_preset(&mut self) -> Result<Option<PathBuf>> {
        self.sync_calibration_to_preset()?;
        self.presets.save_active()
    }

    /// Syncs calibration and saves the active preset under a new name.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePreset` or I/O errors.
    pub fn save_preset_as(&mut self, name: &str) -> Result<PathBuf> {
        self.sync_calibration_to_preset()?;
        self.presets.save_active_as(name)
    }
}
