// Before/after FPS comparison engine
//
// Pipeline, each stage depending only on the previous one:
// 1. Sample store     - raw `trace,fps` rows per run (crate::samples)
// 2. Aggregation      - min/max/mean/stddev per trace, optional min/max trimming
// 3. Classification   - helped/hurt/unchanged against a noise threshold, lost/gained
// 4. Population stats - mean/median/min/max of deltas over helped and hurt
// 5. Report           - ordered text (or JSON, see crate::json_output)
//
// Per-trace work is independent; the final sort happens once in
// classify::compare_runs so output order never depends on map iteration.

mod classify;
mod config;
mod report;
mod statistics;
mod summary;

pub use classify::{
    classify, compare_runs, presentation_order, Classification, ComparisonSet, Outcome,
    TraceComparison,
};
pub use config::{CompareConfig, DEFAULT_THRESHOLD};
pub use report::{
    change, change_with_std_deviation, format_num, format_percent, result_line, ComparisonReport,
    METRIC,
};
pub use statistics::{
    aggregate, median, remove_extremes, AggregateStatistics, RelativeChange, RunResultSet,
    MIN_SAMPLES_FOR_TRIM,
};
pub use summary::{summarize, ChangeStats, PopulationSummary, RunTotals};

use crate::error::Result;
use crate::filter::TraceFilter;
use crate::samples::SampleStore;
use std::path::Path;

/// Compare two already-ingested runs
///
/// Fails if any trace of either run cannot be aggregated.
pub fn compare_samples(
    before: &SampleStore,
    after: &SampleStore,
    config: &CompareConfig,
) -> Result<ComparisonReport> {
    config.validate()?;

    let before = RunResultSet::from_samples(before, config.skip_min_max)?;
    let after = RunResultSet::from_samples(after, config.skip_min_max)?;
    let comparison = compare_runs(&before, &after, config.threshold);

    Ok(ComparisonReport::new(comparison))
}

/// Read both result files and compare them
///
/// # Example
/// ```no_run
/// use fps_report::regression::{compare_files, CompareConfig};
/// use std::path::Path;
///
/// let config = CompareConfig::default();
/// let report = compare_files(Path::new("before.csv"), Path::new("after.csv"), &config).unwrap();
/// print!("{}", report.to_report_string(&config));
/// ```
pub fn compare_files(before: &Path, after: &Path, config: &CompareConfig) -> Result<ComparisonReport> {
    let filter = TraceFilter::from_config(config)?;
    let before = SampleStore::from_path(before, &filter)?;
    let after = SampleStore::from_path(after, &filter)?;
    compare_samples(&before, &after, config)
}
