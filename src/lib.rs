//! fps-report - Before/after FPS comparison for benchmark trace runs
//!
//! This library ingests per-trace FPS samples from two runs (the "before"
//! and "after" of a driver change), aggregates them, classifies every trace
//! as helped, hurt, unchanged, lost or gained against a noise threshold, and
//! renders the result as a text or JSON report.

pub mod cli;
pub mod error;
pub mod filter;
pub mod fps_summary;
pub mod json_output;
pub mod regression;
pub mod samples;
