//! CLI argument parsing for fps-report

use crate::error::Result;
use crate::regression::CompareConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fps-report")]
#[command(version)]
#[command(about = "Report FPS changes between two benchmark trace runs", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify traces as helped/hurt/lost/gained between two result files
    Compare(CompareArgs),
    /// Print average, min and max FPS of a per-frame overlay log
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Results before the change (`trace_name,fps` rows)
    pub before: PathBuf,

    /// Results after the change (`trace_name,fps` rows)
    pub after: PathBuf,

    /// Do not show the per-trace helped/hurt data
    #[arg(short = 's', long = "summary-only")]
    pub summary_only: bool,

    /// Skip gfxreconstruct (.gfxr) traces
    #[arg(long = "skip-gfxrecon")]
    pub skip_gfxrecon: bool,

    /// Skip apitrace (.trace) traces
    #[arg(long = "skip-apitrace")]
    pub skip_apitrace: bool,

    /// Remove one min and one max sample per trace (needs at least 3 samples)
    #[arg(long = "skip-min-max")]
    pub skip_min_max: bool,

    /// Show the standard deviation of each FPS average
    #[arg(long = "show-std-deviation")]
    pub show_std_deviation: bool,

    /// Threshold used to determine helped/HURT traces (default: 0.005)
    #[arg(long = "threshold", value_name = "FRACTION")]
    pub threshold: Option<f64>,

    /// Exclude matching traces (can be used more than once)
    #[arg(short = 'x', long = "exclude-traces", value_name = "REGEX")]
    pub exclude_traces: Vec<String>,

    /// Include matching traces (can be used more than once)
    #[arg(short = 't', long = "include-traces", value_name = "REGEX")]
    pub include_traces: Vec<String>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CompareArgs {
    /// Build the comparison configuration: file (if any), then flags
    pub fn resolve_config(&self) -> Result<CompareConfig> {
        let base = match &self.config {
            Some(path) => CompareConfig::from_toml_file(path)?,
            None => CompareConfig::default(),
        };
        let config = self.apply_to(base);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the command-line flags on `config`
    pub fn apply_to(&self, mut config: CompareConfig) -> CompareConfig {
        config.summary_only |= self.summary_only;
        config.skip_gfxrecon |= self.skip_gfxrecon;
        config.skip_apitrace |= self.skip_apitrace;
        config.skip_min_max |= self.skip_min_max;
        config.show_std_deviation |= self.show_std_deviation;
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.include_traces.extend(self.include_traces.iter().cloned());
        config.exclude_traces.extend(self.exclude_traces.iter().cloned());
        config
    }
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Overlay log with an `fps` column
    pub fps_file: PathBuf,

    /// Maximum number of samples to use (default: all)
    #[arg(long = "max-samples", value_name = "N")]
    pub max_samples: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_args(args: &[&str]) -> CompareArgs {
        let argv = ["fps-report", "compare"].iter().chain(args.iter());
        match Cli::parse_from(argv).command {
            Command::Compare(args) => args,
            other => panic!("Expected compare command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_compare() {
        let args = compare_args(&["before.csv", "after.csv"]);
        assert_eq!(args.before, PathBuf::from("before.csv"));
        assert_eq!(args.after, PathBuf::from("after.csv"));
        assert!(!args.summary_only);
        assert!(args.threshold.is_none());
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_requires_both_files() {
        let result = Cli::try_parse_from(["fps-report", "compare", "before.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_flags() {
        let args = compare_args(&[
            "-s",
            "--skip-gfxrecon",
            "--skip-apitrace",
            "--skip-min-max",
            "--show-std-deviation",
            "--threshold",
            "0.02",
            "b.csv",
            "a.csv",
        ]);
        assert!(args.summary_only);
        assert!(args.skip_gfxrecon);
        assert!(args.skip_apitrace);
        assert!(args.skip_min_max);
        assert!(args.show_std_deviation);
        assert_eq!(args.threshold, Some(0.02));
    }

    #[test]
    fn test_cli_repeated_patterns() {
        let args = compare_args(&["-x", "^vk", "-x", "gl", "-t", "doom", "b.csv", "a.csv"]);
        assert_eq!(args.exclude_traces, vec!["^vk".to_string(), "gl".to_string()]);
        assert_eq!(args.include_traces, vec!["doom".to_string()]);
    }

    #[test]
    fn test_cli_json_format() {
        let args = compare_args(&["--format", "json", "b.csv", "a.csv"]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_debug_is_global() {
        let cli = Cli::parse_from(["fps-report", "compare", "b.csv", "a.csv", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = compare_args(&["b.csv", "a.csv"]).resolve_config().unwrap();
        assert_eq!(config, CompareConfig::default());
    }

    #[test]
    fn test_apply_to_overrides_file_values() {
        let base = CompareConfig {
            threshold: 0.1,
            exclude_traces: vec!["from-file".to_string()],
            ..CompareConfig::default()
        };
        let args = compare_args(&["--threshold", "0.01", "-x", "from-cli", "--skip-min-max", "b.csv", "a.csv"]);
        let config = args.apply_to(base);

        assert_eq!(config.threshold, 0.01);
        assert!(config.skip_min_max);
        assert_eq!(
            config.exclude_traces,
            vec!["from-file".to_string(), "from-cli".to_string()]
        );
    }

    #[test]
    fn test_resolve_config_rejects_negative_threshold() {
        let args = compare_args(&["--threshold=-1", "b.csv", "a.csv"]);
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_cli_parses_summary() {
        let cli = Cli::parse_from(["fps-report", "summary", "overlay.txt", "--max-samples", "100"]);
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.fps_file, PathBuf::from("overlay.txt"));
                assert_eq!(args.max_samples, Some(100));
            }
            other => panic!("Expected summary command, got {:?}", other),
        }
    }
}
