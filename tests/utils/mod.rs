// Integration test utilities
//
// Helpers for writing result files into a scratch directory

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory holding a before and an after result file
pub struct RunFiles {
    pub dir: TempDir,
    pub before: PathBuf,
    pub after: PathBuf,
}

/// Write `before` and `after` as `before.csv` and `after.csv`
pub fn write_runs(before: &str, after: &str) -> RunFiles {
    let dir = TempDir::new().unwrap();
    let before_path = dir.path().join("before.csv");
    let after_path = dir.path().join("after.csv");
    fs::write(&before_path, before).unwrap();
    fs::write(&after_path, after).unwrap();
    RunFiles {
        dir,
        before: before_path,
        after: after_path,
    }
}

/// Write an extra file next to the run files
pub fn write_file(runs: &RunFiles, name: &str, contents: &str) -> PathBuf {
    let path = runs.dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// `compare` command for the given runs
pub fn compare_cmd(runs: &RunFiles) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fps-report");
    cmd.arg("compare").arg(&runs.before).arg(&runs.after);
    cmd
}
