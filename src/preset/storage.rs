//! Preset persistence: one pretty-printed JSON file per preset.

use std::fs;
use std::path::{Path, PathBuf};

use super::Preset;
use crate::error::{PoseDriveError, Result};

/// File extension of persisted presets.
pub const PRESET_EXTENSION: &str = "json";

/// Path of the file backing preset `name` in `dir`.
#[must_use]
pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, PRESET_EXTENSION))
}

/// Whether `path` looks like a persisted preset.
#[must_use]
pub fn is_preset_file(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == PRESET_EXTENSION)
}

/// Reads a preset file; the preset is named after the file stem.
///
/// # Errors
///
/// - `Io` if the file cannot be read
/// - `MalformedPreset` if the contents are not a valid preset
pub fn read_preset(path: &Path) -> Result<Preset> {
    let contents = fs::read_to_string(path)?;
    let mut preset: Preset =
        serde_json::from_str(&contents).map_err(|source| PoseDriveError::MalformedPreset {
            path: path.to_path_buf(),
            source,
        })?;

    preset.name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(preset)
}

/// Writes `preset` as `dir/<name>.json`, creating `dir` if needed.
///
/// # Errors
///
/// Returns `Io` or `Json` errors from writing.
pub fn write_preset(dir: &Path, name: &str, preset: &Preset) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = preset_path(dir, name);
    let contents = serde_json::to_string_pretty(preset)?;
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationKey;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut preset = Preset::new("ignored");
        preset.mapping.set(CalibrationKey::SteeringSafeAngle, 12.5);

        let path = write_preset(dir.path(), "track", &preset).unwrap();
        assert_eq!(path, dir.path().join("track.json"));

        let loaded = read_preset(&path).unwrap();
        assert_eq!(loaded.name, "track");
        assert_eq!(loaded.mapping.get(CalibrationKey::SteeringSafeAngle), Some(12.5));
        assert_eq!(loaded.visual, preset.visual);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        write_preset(&nested, "x", &Preset::default()).unwrap();
        assert!(nested.join("x.json").is_file());
    }

    #[test]
    fn test_read_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ \"visual\": [1, 2").unwrap();

        match read_preset(&path) {
            Err(PoseDriveError::MalformedPreset { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected MalformedPreset, got {:?}", other),
        }
    }

    #[test]
    fn test_is_preset_file() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("a.json");
        let txt = dir.path().join("a.txt");
        fs::write(&json, "{}").unwrap();
        fs::write(&txt, "{}").unwrap();

        assert!(is_preset_file(&json));
        assert!(!is_preset_file(&txt));
        assert!(!is_preset_file(dir.path()));
    }
}
