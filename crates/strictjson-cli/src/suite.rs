//! Conformance suite runner.
//!
//! A suite is a directory of `*.json` files whose name prefix says what the
//! decoder must do with them: `y_` accept, `n_` reject, `i_` either.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use strictjson::Decoder;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Accept,
    Reject,
    Either,
}

impl Expectation {
    /// Label carried by a file name, if any.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.starts_with("y_") {
            Some(Self::Accept)
        } else if name.starts_with("n_") {
            Some(Self::Reject)
        } else if name.starts_with("i_") {
            Some(Self::Either)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub file: String,
    pub expected: Expectation,
    /// Decode error for wrongly rejected files, decoded type otherwise.
    pub detail: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub passed: usize,
    pub skipped: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Decode one labeled input and record the outcome.
    pub fn record(&mut self, file: &str, expected: Expectation, bytes: &[u8], decoder: &Decoder) {
        let outcome = decoder.decode_slice(bytes);
        let detail = match (&outcome, expected) {
            (_, Expectation::Either) | (Ok(_), Expectation::Accept) | (Err(_), Expectation::Reject) => {
                self.passed += 1;
                return;
            }
            (Err(err), Expectation::Accept) => err.to_string(),
            (Ok(value), Expectation::Reject) => format!("decoded as {}", value.type_name()),
        };
        warn!(file, ?expected, %detail, "suite case failed");
        self.failures.push(Failure {
            file: file.to_string(),
            expected,
            detail,
        });
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for failure in &self.failures {
            let _ = writeln!(
                out,
                "FAIL {} (expected {:?}): {}",
                failure.file, failure.expected, failure.detail
            );
        }
        let _ = writeln!(
            out,
            "passed: {}, failed: {}, skipped: {}",
            self.passed,
            self.failed(),
            self.skipped
        );
        out
    }
}

/// Run every labeled `*.json` file in `dir`, in file-name order.
pub fn run(dir: &Path, decoder: &Decoder) -> Result<Report> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
    paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"));
    paths.sort();

    let mut report = Report::default();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(expected) = Expectation::from_file_name(&name) else {
            debug!(file = %name, "no label, skipping");
            report.skipped += 1;
            continue;
        };
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        report.record(&name, expected, &bytes, decoder);
    }
    Ok(report)
}
