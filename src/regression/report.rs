// Human-readable regression report
//
// Section order: helped traces, hurt traces, lost traces, gained traces,
// then the totals and population summary. Per-trace sections are omitted in
// summary-only mode; the totals never are.

use crate::regression::classify::{ComparisonSet, TraceComparison};
use crate::regression::config::CompareConfig;
use crate::regression::statistics::{AggregateStatistics, RelativeChange};
use crate::regression::summary::{summarize, ChangeStats, PopulationSummary, RunTotals};

/// Name of the compared metric as printed in the report
pub const METRIC: &str = "fps_avg";

/// Width the `name: ` prefix of a per-trace line is padded to
const NAME_COLUMN_WIDTH: usize = 50;

/// Format a fraction (0.1 = 10%) as a percentage with two decimals
///
/// Non-zero magnitudes below 0.01% print as `<.01%`.
pub fn format_percent(frac: f64) -> String {
    if frac.abs() > 0.0 && frac.abs() < 0.0001 {
        "<.01%".to_string()
    } else {
        format!("{:.2}%", frac * 100.0)
    }
}

/// Format a value as an integer when its fractional part is below 0.01
pub fn format_num(n: f64) -> String {
    let whole = n.floor();
    if n - whole < 0.01 {
        // Adding 0.0 turns -0 into 0
        format!("{:.0}", whole + 0.0)
    } else {
        format!("{:.2}", n)
    }
}

/// ` (x.xx%)` for a defined change, nothing otherwise
fn delta_suffix(change: RelativeChange) -> String {
    match change {
        RelativeChange::Defined(r) => format!(" ({})", format_percent(r)),
        RelativeChange::Undefined => String::new(),
    }
}

/// `before -> after (x.xx%)`
pub fn change(before: f64, after: f64) -> String {
    format!(
        "{} -> {}{}",
        format_num(before),
        format_num(after),
        delta_suffix(RelativeChange::between(before, after))
    )
}

fn mean_with_std_deviation(stats: &AggregateStatistics) -> String {
    format!("({} , {})", format_num(stats.mean), format_num(stats.stddev))
}

/// `(mean , stddev) -> (mean , stddev) (x.xx%)`
pub fn change_with_std_deviation(before: &AggregateStatistics, after: &AggregateStatistics) -> String {
    format!(
        "{} -> {}{}",
        mean_with_std_deviation(before),
        mean_with_std_deviation(after),
        delta_suffix(RelativeChange::between(before.mean, after.mean))
    )
}

/// Trace name padded to a fixed column, followed by its change
pub fn result_line(comparison: &TraceComparison, show_std_deviation: bool) -> String {
    let name = format!("{}: ", comparison.key);
    let delta = if show_std_deviation {
        change_with_std_deviation(&comparison.before, &comparison.after)
    } else {
        change(comparison.before.mean, comparison.after.mean)
    };
    format!("{:<width$}{}", name, delta, width = NAME_COLUMN_WIDTH)
}

fn absolute_stats_line(label: &str, stats: &ChangeStats) -> String {
    format!(
        "{} abs change: mean {}, median {}, min {}, max {}\n",
        label,
        format_num(stats.mean),
        format_num(stats.median),
        format_num(stats.min),
        format_num(stats.max)
    )
}

fn relative_stats_line(label: &str, stats: &ChangeStats) -> String {
    format!(
        "{} rel change: mean {}, median {}, min {}, max {}\n",
        label,
        format_percent(stats.mean),
        format_percent(stats.median),
        format_percent(stats.min),
        format_percent(stats.max)
    )
}

/// Complete result of comparing two runs
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub comparison: ComparisonSet,
    pub totals: RunTotals,
    pub helped_summary: PopulationSummary,
    pub hurt_summary: PopulationSummary,
}

impl ComparisonReport {
    pub fn new(comparison: ComparisonSet) -> Self {
        Self {
            totals: RunTotals::from_comparison(&comparison),
            helped_summary: summarize(&comparison.helped),
            hurt_summary: summarize(&comparison.hurt),
            comparison,
        }
    }

    /// Render the text report
    pub fn to_report_string(&self, config: &CompareConfig) -> String {
        let mut report = String::new();
        let set = &self.comparison;

        if !config.summary_only {
            for c in &set.helped {
                report.push_str(&format!(
                    "{}  helped:  {}\n",
                    METRIC,
                    result_line(c, config.show_std_deviation)
                ));
            }
            if !set.helped.is_empty() {
                report.push('\n');
            }

            for c in &set.hurt {
                report.push_str(&format!(
                    "{} HURT: {}\n",
                    METRIC,
                    result_line(c, config.show_std_deviation)
                ));
            }
            if !set.hurt.is_empty() {
                report.push('\n');
            }

            for name in &set.lost {
                report.push_str(&format!("LOST:   {}\n", name));
            }
            if !set.lost.is_empty() {
                report.push('\n');
            }

            for name in &set.gained {
                report.push_str(&format!("GAINED: {}\n", name));
            }
            if !set.gained.is_empty() {
                report.push('\n');
            }
        }

        let totals = &self.totals;
        let any_helped_or_hurt = totals.helped > 0 || totals.hurt > 0;
        if any_helped_or_hurt {
            report.push_str(&format!(
                "total {} in all runs: {}\n",
                METRIC,
                change(totals.all_before, totals.all_after)
            ));
            report.push_str(&format!(
                "total {} in affected (through threshold) runs: {}\n",
                METRIC,
                change(totals.affected_before, totals.affected_after)
            ));
            report.push_str(&format!("helped: {}\n", totals.helped));
            report.push_str(&format!("HURT: {}\n", totals.hurt));

            if self.helped_summary.count > 0 {
                report.push_str(&absolute_stats_line("helped", &self.helped_summary.absolute));
                report.push_str(&relative_stats_line("helped", &self.helped_summary.relative));
            }
            if self.hurt_summary.count > 0 {
                report.push_str(&absolute_stats_line("HURT", &self.hurt_summary.absolute));
                report.push_str(&relative_stats_line("HURT", &self.hurt_summary.relative));
            }
            report.push('\n');
        }

        if !set.lost.is_empty() || !set.gained.is_empty() {
            report.push_str(&format!("LOST:   {}\n", set.lost.len()));
            report.push_str(&format!("GAINED: {}\n", set.gained.len()));
        } else if !any_helped_or_hurt {
            report.push_str("No changes.\n");
        }

        report
    }
}
