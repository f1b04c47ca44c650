//! Sample store: per-trace FPS measurements from one run
//!
//! Input is the file appended to by the trace replay driver, one
//! `trace_name,fps` row per replay and no header. A trace replayed several
//! times contributes several rows, which are collected in file order.

use crate::error::{CompareError, Result};
use crate::filter::TraceFilter;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw measurements for every trace of one run
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    /// Map from trace name to its samples, in input order
    series: HashMap<String, Vec<f64>>,
}

impl SampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one measurement for a trace
    pub fn record(&mut self, key: &str, value: f64) {
        self.series.entry(key.to_string()).or_default().push(value);
    }

    /// Read a results file from disk
    pub fn from_path(path: &Path, filter: &TraceFilter) -> Result<Self> {
        let file = File::open(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, &path.display().to_string(), filter)
    }

    /// Parse `trace_name,value` rows, keeping the traces accepted by `filter`
    ///
    /// Every row must have exactly two fields and a finite numeric value,
    /// even rows that the filter would drop. Blank lines are ignored.
    pub fn from_reader<R: Read>(reader: R, source_name: &str, filter: &TraceFilter) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut store = Self::new();
        let mut rows = 0usize;
        let mut dropped = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|source| CompareError::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let malformed = |reason: String| CompareError::MalformedRow {
                source_name: source_name.to_string(),
                line,
                reason,
            };

            if record.len() != 2 {
                return Err(malformed(format!(
                    "expected 2 fields (trace_name,value), got {}",
                    record.len()
                )));
            }

            let key = &record[0];
            if key.is_empty() {
                return Err(malformed("empty trace name".to_string()));
            }

            let value: f64 = record[1]
                .parse()
                .map_err(|_| malformed(format!("'{}' is not a number", &record[1])))?;
            if !value.is_finite() {
                return Err(malformed(format!("'{}' is not a finite number", &record[1])));
            }

            rows += 1;
            if filter.should_keep(key) {
                store.record(key, value);
            } else {
                dropped += 1;
            }
        }

        tracing::debug!(
            source = source_name,
            rows,
            dropped,
            traces = store.len(),
            "Ingested trace results"
        );

        Ok(store)
    }

    /// Samples recorded for a trace
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Iterate over `(trace, samples)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct traces
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no trace was recorded
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
