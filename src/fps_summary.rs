//! Average/min/max FPS of a single per-frame overlay log
//!
//! The log is written by a Vulkan overlay layer, e.g.
//! `VK_LAYER_MESA_OVERLAY_CONFIG=output_file=/tmp/output.txt`: a header line
//! naming the columns (one of them `fps`) followed by one row per sample.

use crate::error::{CompareError, Result};
use crate::regression::{aggregate, format_num};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column holding the frames-per-second samples
pub const FPS_COLUMN: &str = "fps";

/// FPS statistics of one overlay log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl FpsSummary {
    /// Summarize an overlay log read from `reader`
    ///
    /// `max_samples` limits how many data rows are used; `None` or `Some(0)`
    /// uses all of them.
    pub fn from_reader<R: Read>(
        reader: R,
        source_name: &str,
        max_samples: Option<usize>,
    ) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|source| CompareError::Csv {
            line: 1,
            source,
        })?;
        let fps_index = headers
            .iter()
            .position(|h| h == FPS_COLUMN)
            .ok_or_else(|| CompareError::MissingColumn {
                column: FPS_COLUMN.to_string(),
            })?;

        let limit = max_samples.filter(|&n| n > 0).unwrap_or(usize::MAX);
        let mut values = Vec::new();

        for result in rdr.records() {
            if values.len() >= limit {
                break;
            }
            let record = result.map_err(|source| CompareError::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let field = record.get(fps_index).ok_or_else(|| CompareError::MalformedRow {
                source_name: source_name.to_string(),
                line,
                reason: format!("missing '{}' field", FPS_COLUMN),
            })?;
            let value: f64 = field.parse().map_err(|_| CompareError::MalformedRow {
                source_name: source_name.to_string(),
                line,
                reason: format!("'{}' is not a number", field),
            })?;
            if !value.is_finite() {
                return Err(CompareError::MalformedRow {
                    source_name: source_name.to_string(),
                    line,
                    reason: format!("'{}' is not a finite number", field),
                });
            }
            values.push(value);
        }

        let stats = aggregate(source_name, &values, false)?;
        tracing::debug!(source = source_name, samples = stats.samples, "Summarized FPS log");

        Ok(Self {
            avg: stats.mean,
            min: stats.min,
            max: stats.max,
            samples: stats.samples,
        })
    }

    /// Summarize an overlay log on disk
    pub fn from_path(path: &Path, max_samples: Option<usize>) -> Result<Self> {
        let file = File::open(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, &path.display().to_string(), max_samples)
    }

    /// Three-line text rendering
    pub fn to_report_string(&self) -> String {
        format!(
            "avg_fps: {}\nmin_fps: {}\nmax_fps: {}\n",
            format_num(self.avg),
            format_num(self.min),
            format_num(self.max)
        )
    }
}
