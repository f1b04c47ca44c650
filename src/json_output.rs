//! JSON output format for comparison reports
//!
//! Carries the same information as the text report, with the unrounded f64
//! statistics instead of the `format_num`/`format_percent` renderings.

use crate::error::Result;
use crate::regression::{
    AggregateStatistics, CompareConfig, ComparisonReport, PopulationSummary, RunTotals,
    TraceComparison,
};
use serde::{Deserialize, Serialize};

/// One trace present in both runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTrace {
    /// Trace name (e.g., "doom3-demo1.trace")
    pub trace: String,
    pub before: AggregateStatistics,
    pub after: AggregateStatistics,
    /// `after.mean / before.mean - 1`, null when either mean is zero
    pub relative_change: Option<f64>,
}

impl From<&TraceComparison> for JsonTrace {
    fn from(c: &TraceComparison) -> Self {
        Self {
            trace: c.key.clone(),
            before: c.before,
            after: c.after,
            relative_change: c.change.value(),
        }
    }
}

/// Population statistics of the helped and hurt groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPopulation {
    pub helped: PopulationSummary,
    pub hurt: PopulationSummary,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Noise threshold used for classification
    pub threshold: f64,
    /// Per-trace arrays are empty in summary-only mode
    pub helped: Vec<JsonTrace>,
    pub hurt: Vec<JsonTrace>,
    pub unchanged: Vec<JsonTrace>,
    pub lost: Vec<String>,
    pub gained: Vec<String>,
    pub lost_count: usize,
    pub gained_count: usize,
    pub totals: RunTotals,
    pub population: JsonPopulation,
}

impl JsonReport {
    pub fn new(report: &ComparisonReport, config: &CompareConfig) -> Self {
        let set = &report.comparison;
        let traces = |group: &[TraceComparison]| -> Vec<JsonTrace> {
            if config.summary_only {
                Vec::new()
            } else {
                group.iter().map(JsonTrace::from).collect()
            }
        };
        let names = |group: &[String]| -> Vec<String> {
            if config.summary_only {
                Vec::new()
            } else {
                group.to_vec()
            }
        };

        Self {
            threshold: config.threshold,
            helped: traces(&set.helped),
            hurt: traces(&set.hurt),
            unchanged: traces(&set.unchanged),
            lost: names(&set.lost),
            gained: names(&set.gained),
            lost_count: set.lost.len(),
            gained_count: set.gained.len(),
            totals: report.totals,
            population: JsonPopulation {
                helped: report.helped_summary,
                hurt: report.hurt_summary,
            },
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{compare_runs, RunResultSet};

    fn report() -> ComparisonReport {
        let before: RunResultSet = [
            ("up", 10.0),
            ("zero", 0.0),
            ("flat", 50.0),
            ("gone", 1.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), AggregateStatistics::single(v)))
        .collect();
        let after: RunResultSet = [("up", 20.0), ("zero", 5.0), ("flat", 50.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), AggregateStatistics::single(v)))
            .collect();
        ComparisonReport::new(compare_runs(&before, &after, 0.005))
    }

    #[test]
    fn test_json_report_contents() {
        let config = CompareConfig::default();
        let json = JsonReport::new(&report(), &config).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["threshold"], 0.005);
        assert_eq!(value["helped"].as_array().unwrap().len(), 2);
        assert_eq!(value["unchanged"][0]["trace"], "flat");
        assert_eq!(value["lost"][0], "gone");
        assert_eq!(value["lost_count"], 1);
        assert_eq!(value["totals"]["helped"], 2);
        assert_eq!(value["population"]["hurt"]["count"], 0);
    }

    #[test]
    fn test_json_undefined_change_is_null() {
        let config = CompareConfig::default();
        let parsed = JsonReport::new(&report(), &config);
        let zero = parsed.helped.iter().find(|t| t.trace == "zero").unwrap();
        assert!(zero.relative_change.is_none());

        let json = parsed.to_json().unwrap();
        assert!(json.contains("\"relative_change\": null"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = CompareConfig::default();
        let json = JsonReport::new(&report(), &config).to_json().unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.helped.len(), 2);
        assert_eq!(parsed.gained_count, 0);
    }

    #[test]
    fn test_json_keeps_unrounded_statistics() {
        use crate::regression::compare_samples;
        use crate::samples::SampleStore;

        let mut before = SampleStore::new();
        before.record("big", 1234567.89);
        let mut after = SampleStore::new();
        after.record("big", 60.1);
        after.record("big", 60.1);
        after.record("big", 60.1);

        let config = CompareConfig::default();
        let report = compare_samples(&before, &after, &config).unwrap();
        let parsed = JsonReport::new(&report, &config);

        let trace = &parsed.hurt[0];
        assert_eq!(trace.before.mean, 1234567.89);
        assert_eq!(trace.after.mean, 60.1);
        assert_eq!(trace.after.stddev, 0.0);
    }

    #[test]
    fn test_json_summary_only_drops_traces() {
        let config = CompareConfig {
            summary_only: true,
            ..CompareConfig::default()
        };
        let parsed = JsonReport::new(&report(), &config);
        assert!(parsed.helped.is_empty());
        assert!(parsed.unchanged.is_empty());
        assert!(parsed.lost.is_empty());
        assert_eq!(parsed.lost_count, 1);
        assert_eq!(parsed.totals.helped, 2);
    }
}
