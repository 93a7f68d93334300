//! Rotating JSONL writer for [`ControlRecord`]s.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::ControlRecord;
use crate::config::TelemetryConfig;
use crate::error::Result;

const FILE_PREFIX: &str = "controls_";
const FILE_EXTENSION: &str = "jsonl";

/// Appends records to `controls_<time>_<seq>.jsonl` files under a directory.
///
/// A new file is started every `max_records_per_file` records. After each
/// rotation only the newest `max_files_to_keep` files are kept.
#[derive(Debug)]
pub struct TelemetryLogger {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    current_path: Option<PathBuf>,
    records_in_file: usize,
    file_seq: u32,
}

impl TelemetryLogger {
    /// Creates the log directory if needed. No file is opened until the
    /// first record.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(
        dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            max_records_per_file: max_records_per_file.max(1),
            max_files_to_keep: max_files_to_keep.max(1),
            writer: None,
            current_path: None,
            records_in_file: 0,
            file_seq: 0,
        })
    }

    /// Creates a logger from the `[telemetry]` section.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the log directory cannot be created.
    pub fn from_config(config: &TelemetryConfig) -> Result<Self> {
        Self::new(&config.log_dir, config.max_records_per_file, config.max_files_to_keep)
    }

    /// File currently being written, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Appends one record, rotating first if the current file is full.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Json` errors from writing.
    pub fn log(&mut self, record: &ControlRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        if let Some(writer) = self.writer.as_mut() {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
            self.records_in_file += 1;
        }
        Ok(())
    }

    /// Flushes buffered records to disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        self.flush()?;

        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!(
            "{}{}_{:04}.{}",
            FILE_PREFIX, stamp, self.file_seq, FILE_EXTENSION
        ));
        self.file_seq = self.file_seq.wrapping_add(1);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("Telemetry logging to {}", path.display());

        self.writer = Some(BufWriter::new(file));
        self.current_path = Some(path);
        self.records_in_file = 0;

        self.prune()
    }

    /// Deletes the oldest log files beyond the retention limit.
    fn prune(&self) -> Result<()> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_log_file(path))
            .collect();

        if files.len() <= self.max_files_to_keep {
            return Ok(());
        }

        // Names sort chronologically
        files.sort();
        let excess = files.len() - self.max_files_to_keep;
        for path in files.into_iter().take(excess) {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed old telemetry file {}", path.display()),
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
        Ok(())
    }
}

impl Drop for TelemetryLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Failed to flush telemetry: {}", e);
        }
    }
}

fn is_log_file(path: &Path) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with(FILE_PREFIX));
    let ext_ok = path.extension().map_or(false, |ext| ext == FILE_EXTENSION);
    name_ok && ext_ok && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControlFeature;
    use tempfile::TempDir;

    fn record(frame: u64) -> ControlRecord {
        ControlRecord::new(frame, "default", &ControlFeature::default(), false)
    }

    fn log_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| is_log_file(p))
            .collect();
        files.sort();
        files
    }

    // ==================== Writing Tests ====================

    #[test]
    fn test_no_file_before_first_record() {
        let dir = TempDir::new().unwrap();
        let logger = TelemetryLogger::new(dir.path(), 10, 5).unwrap();
        assert!(logger.current_path().is_none());
        assert!(log_files(dir.path()).is_empty());
    }

    #[test]
    fn test_records_are_json_lines() {
        let dir = TempDir::new().unwrap();
        let mut logger = TelemetryLogger::new(dir.path(), 10, 5).unwrap();
        for frame in 0..3 {
            logger.log(&record(frame)).unwrap();
        }
        logger.flush().unwrap();

        let path = logger.current_path().unwrap().to_path_buf();
        let contents = fs::read_to_string(path).unwrap();
        let frames: Vec<u64> = contents
            .lines()
            .map(|line| serde_json::from_str::<ControlRecord>(line).unwrap().frame)
            .collect();
        assert_eq!(frames, vec![0, 1, 2]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("logs").join("session");
        let mut logger = TelemetryLogger::new(&nested, 10, 5).unwrap();
        logger.log(&record(0)).unwrap();
        assert_eq!(log_files(&nested).len(), 1);
    }

    // ==================== Rotation Tests ====================

    #[test]
    fn test_rotates_after_max_records() {
        let dir = TempDir::new().unwrap();
        let mut logger = TelemetryLogger::new(dir.path(), 3, 10).unwrap();
        for frame in 0..7 {
            logger.log(&record(frame)).unwrap();
        }
        logger.flush().unwrap();

        let files = log_files(dir.path());
        assert_eq!(files.len(), 3);
        let counts: Vec<usize> = files
            .iter()
            .map(|p| fs::read_to_string(p).unwrap().lines().count())
            .collect();
        assert_eq!(counts, vec![3, 3, 1]);
    }

    #[test]
    fn test_keeps_newest_files() {
        let dir = TempDir::new().unwrap();
        let mut logger = TelemetryLogger::new(dir.path(), 1, 2).unwrap();
        for frame in 0..5 {
            logger.log(&record(frame)).unwrap();
        }
        logger.flush().unwrap();

        let files = log_files(dir.path());
        assert_eq!(files.len(), 2);
        let last = fs::read_to_string(files.last().unwrap()).unwrap();
        let rec: ControlRecord = serde_json::from_str(last.trim()).unwrap();
        assert_eq!(rec.frame, 4);
    }

    #[test]
    fn test_prune_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("pose-drive.log");
        fs::write(&other, "keep me").unwrap();

        let mut logger = TelemetryLogger::new(dir.path(), 1, 1).unwrap();
        for frame in 0..3 {
            logger.log(&record(frame)).unwrap();
        }
        assert!(other.is_file());
        assert_eq!(log_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_from_config() {
        let dir = TempDir::new().unwrap();
        let config = TelemetryConfig {
            enabled: true,
            log_dir: dir.path().join("t").to_string_lossy().into_owned(),
            ..TelemetryConfig::default()
        };
        let mut logger = TelemetryLogger::from_config(&config).unwrap();
        logger.log(&record(0)).unwrap();
        assert!(logger.current_path().unwrap().starts_with(dir.path().join("t")));
    }
}
