//! Trace filtering for ingestion
//!
//! Decides which trace keys survive into the sample store:
//! - Include patterns: `-t REGEX` (a key must match at least one, if any are given)
//! - Exclude patterns: `-x REGEX` (a matching key is always dropped)
//! - Skipped capture formats: `.gfxr` (gfxreconstruct) and `.trace` (apitrace)
//!
//! Patterns are compiled once per run and matched case-insensitively anywhere
//! in the key.

use crate::error::{CompareError, Result};
use crate::regression::CompareConfig;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// File extension of gfxreconstruct captures
pub const GFXRECON_EXTENSION: &str = "gfxr";

/// File extension of apitrace captures
pub const APITRACE_EXTENSION: &str = "trace";

/// Predicate deciding which trace keys are kept during ingestion
#[derive(Debug, Clone, Default)]
pub struct TraceFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    skipped_extensions: Vec<String>,
}

impl TraceFilter {
    /// Create a filter that keeps every trace
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile include/exclude pattern lists
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
            skipped_extensions: Vec::new(),
        })
    }

    /// Build the filter described by a comparison configuration
    pub fn from_config(config: &CompareConfig) -> Result<Self> {
        let mut filter = Self::new(&config.include_traces, &config.exclude_traces)?;
        if config.skip_gfxrecon {
            filter = filter.skip_extension(GFXRECON_EXTENSION);
        }
        if config.skip_apitrace {
            filter = filter.skip_extension(APITRACE_EXTENSION);
        }
        Ok(filter)
    }

    /// Drop every key whose final extension equals `extension` (without the dot)
    pub fn skip_extension(mut self, extension: &str) -> Self {
        self.skipped_extensions.push(extension.to_string());
        self
    }

    /// Check if a trace key should be kept
    pub fn should_keep(&self, key: &str) -> bool {
        if let Some(ext) = Path::new(key).extension().and_then(|e| e.to_str()) {
            if self.skipped_extensions.iter().any(|s| s == ext) {
                return false;
            }
        }

        // No include patterns = keep all
        if !self.include.is_empty() && !self.include.iter().any(|r| r.is_match(key)) {
            return false;
        }

        !self.exclude.iter().any(|r| r.is_match(key))
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| CompareError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
        })
        .collect()
}
