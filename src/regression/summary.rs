// Population statistics over the helped and hurt groups
//
// Characterizes how large the improvements/regressions are as a whole:
// mean, median, min and max of the absolute and relative FPS deltas, plus the
// before/after FPS totals over all shared and all affected traces.

use crate::regression::classify::{ComparisonSet, TraceComparison};
use crate::regression::statistics::{mean, median};
use serde::{Deserialize, Serialize};

/// Mean, median, min and max of a list of deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl ChangeStats {
    /// Statistics of `values`; all zero for an empty slice
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        Self {
            mean: mean(values),
            median: median(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Aggregate change statistics of one classification group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    /// Number of traces in the group
    pub count: usize,
    /// Over `|after.mean - before.mean|`
    pub absolute: ChangeStats,
    /// Over `|after.mean - before.mean| / before.mean` (0 when before.mean is 0)
    pub relative: ChangeStats,
}

/// Summarize a group of helped or hurt traces
///
/// Never fails: an empty group yields an all-zero summary.
pub fn summarize(group: &[TraceComparison]) -> PopulationSummary {
    let absolute: Vec<f64> = group.iter().map(TraceComparison::absolute_delta).collect();
    let relative: Vec<f64> = group
        .iter()
        .map(|c| {
            if c.before.mean == 0.0 {
                0.0
            } else {
                c.absolute_delta() / c.before.mean
            }
        })
        .collect();

    PopulationSummary {
        count: group.len(),
        absolute: ChangeStats::from_values(&absolute),
        relative: ChangeStats::from_values(&relative),
    }
}

/// FPS totals across the shared traces of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of before means over every shared trace
    pub all_before: f64,
    /// Sum of after means over every shared trace
    pub all_after: f64,
    /// Sum of before means over helped and hurt traces
    pub affected_before: f64,
    /// Sum of after means over helped and hurt traces
    pub affected_after: f64,
    pub helped: usize,
    pub hurt: usize,
}

impl RunTotals {
    pub fn from_comparison(set: &ComparisonSet) -> Self {
        let (all_before, all_after) = sum_means(set.shared());
        let (affected_before, affected_after) = sum_means(set.affected());

        Self {
            all_before,
            all_after,
            affected_before,
            affected_after,
            helped: set.helped.len(),
            hurt: set.hurt.len(),
        }
    }
}

fn sum_means<'a>(traces: impl Iterator<Item = &'a TraceComparison>) -> (f64, f64) {
    traces.fold((0.0, 0.0), |(b, a), c| (b + c.before.mean, a + c.after.mean))
}
