// Helped/hurt/unchanged classification of traces shared by two runs
//
// FPS is a throughput metric: higher is better. A trace whose mean moves by
// more than the configured fraction is helped or hurt; traces present in only
// one run are lost or gained.

use crate::regression::statistics::{AggregateStatistics, RelativeChange, RunResultSet};
use serde::Serialize;
use std::cmp::Ordering;

/// Classification of a trace present in both runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    /// Mean FPS increased beyond the threshold
    Helped,
    /// Mean FPS decreased beyond the threshold
    Hurt,
    /// Change within the noise threshold
    Unchanged,
}

/// Where a trace ended up after comparing two runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Classified(Classification),
    /// Only in the before run
    Lost,
    /// Only in the after run
    Gained,
}

/// Classify one trace from its before/after statistics
///
/// Unchanged when `|after/before - 1| <= threshold`. When the relative change
/// is undefined (a zero mean), the means are compared directly.
///
/// # Example
/// ```
/// use fps_report::regression::{classify, AggregateStatistics, Classification};
///
/// let before = AggregateStatistics::single(100.0);
/// let after = AggregateStatistics::single(100.3);
/// assert_eq!(classify(&before, &after, 0.005), Classification::Unchanged);
/// ```
pub fn classify(
    before: &AggregateStatistics,
    after: &AggregateStatistics,
    threshold: f64,
) -> Classification {
    if let RelativeChange::Defined(r) = RelativeChange::between(before.mean, after.mean) {
        if r.abs() <= threshold {
            return Classification::Unchanged;
        }
    }

    match after.mean.partial_cmp(&before.mean) {
        Some(Ordering::Greater) => Classification::Helped,
        Some(Ordering::Less) => Classification::Hurt,
        _ => Classification::Unchanged,
    }
}

/// Comparison of one trace present in both runs
#[derive(Debug, Clone, PartialEq)]
pub struct TraceComparison {
    pub key: String,
    pub before: AggregateStatistics,
    pub after: AggregateStatistics,
    pub change: RelativeChange,
    pub classification: Classification,
}

impl TraceComparison {
    pub fn new(key: &str, before: AggregateStatistics, after: AggregateStatistics, threshold: f64) -> Self {
        Self {
            key: key.to_string(),
            before,
            after,
            change: RelativeChange::between(before.mean, after.mean),
            classification: classify(&before, &after, threshold),
        }
    }

    /// `|after.mean - before.mean|`
    pub fn absolute_delta(&self) -> f64 {
        (self.after.mean - self.before.mean).abs()
    }
}

/// Presentation order for helped/hurt traces
///
/// Largest `|relative change|` first (undefined changes before all others),
/// ties broken by trace name.
pub fn presentation_order(a: &TraceComparison, b: &TraceComparison) -> Ordering {
    b.change
        .magnitude()
        .total_cmp(&a.change.magnitude())
        .then_with(|| a.key.cmp(&b.key))
}

/// Every trace of both runs, partitioned by outcome
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    /// Sorted by [`presentation_order`]
    pub helped: Vec<TraceComparison>,
    /// Sorted by [`presentation_order`]
    pub hurt: Vec<TraceComparison>,
    /// Sorted by trace name
    pub unchanged: Vec<TraceComparison>,
    /// Sorted lexicographically
    pub lost: Vec<String>,
    /// Sorted lexicographically
    pub gained: Vec<String>,
}

impl ComparisonSet {
    /// Traces present in both runs, in helped, hurt, unchanged order
    pub fn shared(&self) -> impl Iterator<Item = &TraceComparison> {
        self.helped.iter().chain(&self.hurt).chain(&self.unchanged)
    }

    /// Traces that moved beyond the threshold
    pub fn affected(&self) -> impl Iterator<Item = &TraceComparison> {
        self.helped.iter().chain(&self.hurt)
    }

    /// True when any trace was helped, hurt, lost or gained
    pub fn has_changes(&self) -> bool {
        !(self.helped.is_empty()
            && self.hurt.is_empty()
            && self.lost.is_empty()
            && self.gained.is_empty())
    }

    /// Outcome recorded for a trace, if it appeared in either run
    pub fn outcome_of(&self, key: &str) -> Option<Outcome> {
        if let Some(c) = self.shared().find(|c| c.key == key) {
            return Some(Outcome::Classified(c.classification));
        }
        if self.lost.iter().any(|k| k == key) {
            return Some(Outcome::Lost);
        }
        if self.gained.iter().any(|k| k == key) {
            return Some(Outcome::Gained);
        }
        None
    }
}

/// Compare two runs trace by trace
///
/// # Example
/// ```
/// use fps_report::regression::{compare_runs, AggregateStatistics, RunResultSet};
///
/// let before: RunResultSet = [("a".to_string(), AggregateStatistics::single(10.0))].into_iter().collect();
/// let after: RunResultSet = [("a".to_string(), AggregateStatistics::single(20.0))].into_iter().collect();
///
/// let set = compare_runs(&before, &after, 0.005);
/// assert_eq!(set.helped.len(), 1);
/// assert_eq!(set.helped[0].change.value(), Some(1.0));
/// ```
pub fn compare_runs(before: &RunResultSet, after: &RunResultSet, threshold: f64) -> ComparisonSet {
    let mut set = ComparisonSet::default();

    for (key, before_stats) in before.iter() {
        let Some(after_stats) = after.get(key) else {
            set.lost.push(key.to_string());
            continue;
        };

        let comparison = TraceComparison::new(key, *before_stats, *after_stats, threshold);
        if comparison.change == RelativeChange::Undefined {
            tracing::warn!(
                trace = key,
                before = before_stats.mean,
                after = after_stats.mean,
                "Relative change undefined for zero mean"
            );
        }

        match comparison.classification {
            Classification::Helped => set.helped.push(comparison),
            Classification::Hurt => set.hurt.push(comparison),
            Classification::Unchanged => set.unchanged.push(comparison),
        }
    }

    set.gained = after
        .iter()
        .filter(|(key, _)| !before.contains_key(key))
        .map(|(key, _)| key.to_string())
        .collect();

    set.helped.sort_by(presentation_order);
    set.hurt.sort_by(presentation_order);
    set.unchanged.sort_by(|a, b| a.key.cmp(&b.key));
    set.lost.sort();
    set.gained.sort();

    tracing::info!(
        helped = set.helped.len(),
        hurt = set.hurt.len(),
        unchanged = set.unchanged.len(),
        lost = set.lost.len(),
        gained = set.gained.len(),
        "Classified traces"
    );

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(entries: &[(&str, f64)]) -> RunResultSet {
        entries
            .iter()
            .map(|&(k, mean)| (k.to_string(), AggregateStatistics::single(mean)))
            .collect()
    }

    #[test]
    fn test_classify_helped() {
        let c = classify(&AggregateStatistics::single(10.0), &AggregateStatistics::single(20.0), 0.005);
        assert_eq!(c, Classification::Helped);
    }

    #[test]
    fn test_classify_hurt() {
        let c = classify(&AggregateStatistics::single(20.0), &AggregateStatistics::single(10.0), 0.005);
        assert_eq!(c, Classification::Hurt);
    }

    #[test]
    fn test_classify_within_threshold() {
        let c = classify(&AggregateStatistics::single(100.0), &AggregateStatistics::single(100.3), 0.005);
        assert_eq!(c, Classification::Unchanged);
        let c = classify(&AggregateStatistics::single(100.0), &AggregateStatistics::single(99.7), 0.005);
        assert_eq!(c, Classification::Unchanged);
    }

    #[test]
    fn test_classify_threshold_boundary_is_unchanged() {
        // r = 0.5 exactly, threshold 0.5
        let c = classify(&AggregateStatistics::single(2.0), &AggregateStatistics::single(3.0), 0.5);
        assert_eq!(c, Classification::Unchanged);
    }

    #[test]
    fn test_classify_zero_before_is_helped() {
        let c = classify(&AggregateStatistics::single(0.0), &AggregateStatistics::single(10.0), 0.005);
        assert_eq!(c, Classification::Helped);
    }

    #[test]
    fn test_classify_zero_after_is_hurt() {
        let c = classify(&AggregateStatistics::single(10.0), &AggregateStatistics::single(0.0), 0.005);
        assert_eq!(c, Classification::Hurt);
    }

    #[test]
    fn test_classify_both_zero_is_unchanged() {
        let c = classify(&AggregateStatistics::single(0.0), &AggregateStatistics::single(0.0), 0.005);
        assert_eq!(c, Classification::Unchanged);
    }

    #[test]
    fn test_compare_runs_partitions_keys() {
        let before = run(&[("up", 10.0), ("down", 10.0), ("flat", 10.0), ("gone", 5.0)]);
        let after = run(&[("up", 20.0), ("down", 5.0), ("flat", 10.0), ("new", 5.0)]);

        let set = compare_runs(&before, &after, 0.005);
        assert_eq!(set.outcome_of("up"), Some(Outcome::Classified(Classification::Helped)));
        assert_eq!(set.outcome_of("down"), Some(Outcome::Classified(Classification::Hurt)));
        assert_eq!(set.outcome_of("flat"), Some(Outcome::Classified(Classification::Unchanged)));
        assert_eq!(set.outcome_of("gone"), Some(Outcome::Lost));
        assert_eq!(set.outcome_of("new"), Some(Outcome::Gained));
        assert_eq!(set.outcome_of("never"), None);
        assert!(set.has_changes());
    }

    #[test]
    fn test_compare_runs_sorts_by_magnitude_then_name() {
        let before = run(&[("a", 10.0), ("b", 10.0), ("c", 10.0), ("z", 0.0)]);
        let after = run(&[("a", 11.0), ("b", 20.0), ("c", 11.0), ("z", 5.0)]);

        let set = compare_runs(&before, &after, 0.005);
        let order: Vec<&str> = set.helped.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(order, vec!["z", "b", "a", "c"]);
    }

    #[test]
    fn test_compare_runs_hurt_uses_same_order() {
        let before = run(&[("small", 100.0), ("large", 100.0)]);
        let after = run(&[("small", 90.0), ("large", 50.0)]);

        let set = compare_runs(&before, &after, 0.005);
        let order: Vec<&str> = set.hurt.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(order, vec!["large", "small"]);
    }

    #[test]
    fn test_compare_runs_lost_and_gained_sorted() {
        let before = run(&[("zeta", 1.0), ("alpha", 1.0)]);
        let after = run(&[("omega", 1.0), ("beta", 1.0)]);

        let set = compare_runs(&before, &after, 0.005);
        assert_eq!(set.lost, vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(set.gained, vec!["beta".to_string(), "omega".to_string()]);
        assert_eq!(set.shared().count(), 0);
    }

    #[test]
    fn test_compare_runs_no_changes() {
        let before = run(&[("a", 10.0)]);
        let after = run(&[("a", 10.0)]);

        let set = compare_runs(&before, &after, 0.005);
        assert!(!set.has_changes());
        assert_eq!(set.unchanged.len(), 1);
        assert_eq!(set.affected().count(), 0);
    }

    #[test]
    fn test_absolute_delta() {
        let c = TraceComparison::new(
            "t",
            AggregateStatistics::single(30.0),
            AggregateStatistics::single(12.0),
            0.005,
        );
        assert_eq!(c.absolute_delta(), 18.0);
        assert_eq!(c.classification, Classification::Hurt);
    }
}
