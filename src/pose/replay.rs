//! Replays recorded landmark streams.
//!
//! One frame per line. A line is either `null` (no detection that frame) or
//! a JSON array of 33 `[x, y, z]` triples:
//!
//! ```text
//! null
//! [[0.51, 0.22, -0.3], [0.52, 0.20, -0.3], ...]
//! ```
//!
//! Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use super::{LandmarkFrame, PoseSource};
use crate::error::Result;
use crate::geometry::Point3;

/// Reads landmark frames from a JSONL recording.
pub struct ReplaySource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl ReplaySource<BufReader<File>> {
    /// Opens a recording file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pose_drive::pose::{PoseSource, ReplaySource};
    ///
    /// let mut source = ReplaySource::open("recordings/lap.jsonl")?;
    /// while let Some(detection) = source.poll()? {
    ///     println!("detected: {}", detection.is_some());
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Opened pose replay {}", path.as_ref().display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    /// Wraps any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Parses one non-blank line into a detection.
    fn parse_line(line: &str) -> Result<Option<LandmarkFrame>> {
        let raw: Option<Vec<[f64; 3]>> = serde_json::from_str(line)?;
        match raw {
            None => Ok(None),
            Some(triples) => {
                let points: Vec<Point3> = triples
                    .iter()
                    .map(|&[x, y, z]| Point3::new(x, y, z))
                    .collect();
                LandmarkFrame::from_points(&points).map(Some)
            }
        }
    }
}

impl<R: BufRead> PoseSource for ReplaySource<R> {
    fn poll(&mut self) -> Result<Option<Option<LandmarkFrame>>> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Self::parse_line(trimmed).map(Some);
        }
        Ok(None)
    }
}
