// Configuration for before/after FPS comparison
//
// Built once per run (from defaults, an optional TOML file and command-line
// flags) and passed by reference into every stage.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default noise floor for helped/hurt classification (0.5%)
pub const DEFAULT_THRESHOLD: f64 = 0.005;

/// Configuration for comparing two benchmark runs
///
/// # Example
/// ```
/// use fps_report::regression::CompareConfig;
///
/// let config = CompareConfig::default();
/// assert_eq!(config.threshold, 0.005);
/// assert!(!config.skip_min_max);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Relative change below which a trace is considered unchanged
    ///
    /// A trace whose mean FPS moves by at most this fraction (0.005 = 0.5%)
    /// is reported as unchanged rather than helped or hurt.
    pub threshold: f64,

    /// Suppress per-trace lines, keep the population summary
    pub summary_only: bool,

    /// Drop gfxreconstruct (`.gfxr`) traces at ingestion
    pub skip_gfxrecon: bool,

    /// Drop apitrace (`.trace`) traces at ingestion
    pub skip_apitrace: bool,

    /// Remove one minimum and one maximum sample before aggregating
    ///
    /// Only applied to series with at least 3 samples.
    pub skip_min_max: bool,

    /// Show the standard deviation next to each per-trace mean
    pub show_std_deviation: bool,

    /// Keep only traces matching at least one of these regexes (case-insensitive)
    pub include_traces: Vec<String>,

    /// Drop traces matching any of these regexes (case-insensitive)
    pub exclude_traces: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            summary_only: false,
            skip_gfxrecon: false,
            skip_apitrace: false,
            skip_min_max: false,
            show_std_deviation: false,
            include_traces: Vec::new(),
            exclude_traces: Vec::new(),
        }
    }
}

impl CompareConfig {
    /// Parse a configuration from TOML text
    ///
    /// Missing keys keep their default values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CompareError::InvalidConfig(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }

        Ok(())
    }
}
