// Per-trace aggregation of FPS samples
//
// Reduces the repeated measurements of one trace to min/max/mean and the
// population standard deviation, optionally after discarding one minimum and
// one maximum sample.
//
// Everything is computed in f64; the variance uses two passes (mean first,
// then squared deviations) so constant series give exactly 0.

use crate::error::{CompareError, Result};
use crate::samples::SampleStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Minimum series length for min/max trimming
pub const MIN_SAMPLES_FOR_TRIM: usize = 3;

/// Summary statistics of one trace's samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation (0 for a single sample)
    pub stddev: f64,
    /// Number of samples that contributed, after trimming
    pub samples: usize,
}

impl AggregateStatistics {
    /// Statistics of a single measurement
    pub fn single(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            mean: value,
            stddev: 0.0,
            samples: 1,
        }
    }
}

/// Relative change of a mean between two runs
///
/// Undefined when either mean is zero, so no caller ever divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelativeChange {
    /// `after / before - 1`
    Defined(f64),
    Undefined,
}

impl RelativeChange {
    pub fn between(before: f64, after: f64) -> Self {
        if before != 0.0 && after != 0.0 {
            RelativeChange::Defined(after / before - 1.0)
        } else {
            RelativeChange::Undefined
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            RelativeChange::Defined(r) => Some(r),
            RelativeChange::Undefined => None,
        }
    }

    /// Absolute size of the change; undefined changes rank above every defined one
    pub fn magnitude(self) -> f64 {
        match self {
            RelativeChange::Defined(r) => r.abs(),
            RelativeChange::Undefined => f64::INFINITY,
        }
    }
}

/// Aggregate the samples of one trace
///
/// With `trim_extremes` set and at least 3 samples, one occurrence of the
/// minimum and one of the maximum are removed first.
///
/// # Example
/// ```
/// use fps_report::regression::aggregate;
///
/// let stats = aggregate("demo.trace", &[1.0, 5.0, 100.0], true).unwrap();
/// assert_eq!(stats.mean, 5.0);
/// assert_eq!(stats.stddev, 0.0);
/// ```
pub fn aggregate(key: &str, samples: &[f64], trim_extremes: bool) -> Result<AggregateStatistics> {
    let mut series = samples.to_vec();

    if trim_extremes && series.len() >= MIN_SAMPLES_FOR_TRIM {
        remove_extremes(&mut series);
        tracing::trace!(
            trace = key,
            before = samples.len(),
            after = series.len(),
            "Trimmed min/max samples"
        );
    }

    if series.is_empty() {
        return Err(CompareError::EmptySeries {
            key: key.to_string(),
        });
    }

    Ok(compute_block(&series))
}

/// Remove one occurrence of the minimum and one of the maximum
///
/// No-op for series shorter than 3.
pub fn remove_extremes(series: &mut Vec<f64>) {
    if series.len() < MIN_SAMPLES_FOR_TRIM {
        return;
    }
    if let Some(i) = extreme_index(series, Ordering::Less) {
        series.remove(i);
    }
    if let Some(i) = extreme_index(series, Ordering::Greater) {
        series.remove(i);
    }
}

/// Index of the first sample that is strictly `wanted` than all before it
fn extreme_index(series: &[f64], wanted: Ordering) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in series.iter().enumerate() {
        match best {
            Some((_, current)) if value.partial_cmp(&current) != Some(wanted) => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

/// Arithmetic mean of a non-empty series
pub(crate) fn mean(series: &[f64]) -> f64 {
    series.iter().sum::<f64>() / series.len() as f64
}

/// Population standard deviation (divide by n) around `mean`
fn population_stddev(series: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = series.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / series.len() as f64).sqrt()
}

/// Compute the statistics of a non-empty series
fn compute_block(series: &[f64]) -> AggregateStatistics {
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Summation rounding can push the mean just outside [min, max]
    let mean = mean(series).max(min).min(max);

    AggregateStatistics {
        min,
        max,
        mean,
        stddev: population_stddev(series, mean),
        samples: series.len(),
    }
}

/// Median of `values`, averaging the two middle values for even lengths
///
/// Returns 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Aggregated statistics for every trace of one run
#[derive(Debug, Clone, Default)]
pub struct RunResultSet {
    stats: HashMap<String, AggregateStatistics>,
}

impl RunResultSet {
    /// Aggregate every series of a sample store
    ///
    /// Fails on the first trace that cannot be aggregated.
    pub fn from_samples(store: &SampleStore, trim_extremes: bool) -> Result<Self> {
        let stats = store
            .iter()
            .map(|(key, samples)| Ok((key.to_string(), aggregate(key, samples, trim_extremes)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { stats })
    }

    pub fn get(&self, key: &str) -> Option<&AggregateStatistics> {
        self.stats.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.stats.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregateStatistics)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl FromIterator<(String, AggregateStatistics)> for RunResultSet {
    fn from_iter<I: IntoIterator<Item = (String, AggregateStatistics)>>(iter: I) -> Self {
        Self {
            stats: iter.into_iter().collect(),
        }
    }
}
