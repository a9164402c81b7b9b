//! Result Tracker.
//!
//! An explicitly passed collector owned by the suite runner — no
//! process-global state. Each finished case is classified into an
//! [`Outcome`] and recorded under its `code` identifier; the mapping is
//! last-write-wins per code for the tracker's lifetime, so duplicate codes
//! collapse to the final observed outcome. A case with no bound code
//! produces no entry.
//!
//! Classification policy: a captured failure text always wins (`Failed`);
//! otherwise a case that completed successfully is `Passed`; anything else
//! is `Skipped`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Case completed successfully
    Passed,
    /// Case reported a failure
    Failed,
    /// Case did not run to a verdict
    Skipped,
}

impl Outcome {
    /// Upper-case outcome label as reported
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report for one finished case, assembled by the suite runner.
///
/// The `code` association is declared when the case is registered (bound
/// from its data row), never inferred from parameter shapes at report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Bound `code` identifier; `None` leaves the case untracked
    pub code: Option<String>,
    /// Whether the case body completed successfully
    pub passed: bool,
    /// Captured failure text, when any
    pub failure: Option<String>,
}

impl CaseReport {
    /// A successfully completed case
    #[must_use]
    pub fn passed(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            passed: true,
            failure: None,
        }
    }

    /// A case with captured failure text
    #[must_use]
    pub fn failed(code: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            passed: false,
            failure: Some(failure.into()),
        }
    }

    /// A case that did not run to a verdict
    #[must_use]
    pub fn skipped(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            passed: false,
            failure: None,
        }
    }

    /// A case with no bound code; the tracker drops it
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            code: None,
            passed: false,
            failure: None,
        }
    }

    /// Classify the report. Failure text wins over every other signal.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.failure.is_some() {
            Outcome::Failed
        } else if self.passed {
            Outcome::Passed
        } else {
            Outcome::Skipped
        }
    }
}

/// The error line emitted for a failed case
#[must_use]
pub fn failure_line(code: &str, failure: &str) -> String {
    format!("ERROR in test case {code}: {failure}")
}

/// Per-outcome counts over a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Cases that passed
    pub passed: usize,
    /// Cases that failed
    pub failed: usize,
    /// Cases that were skipped
    pub skipped: usize,
}

impl Summary {
    /// Total tracked cases
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Mapping from case code to outcome, owned by the suite runner
#[derive(Debug, Clone, Default)]
pub struct ResultTracker {
    results: HashMap<String, Outcome>,
}

impl ResultTracker {
    /// Create an empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome under a code. Last write wins.
    pub fn insert(&mut self, code: impl Into<String>, outcome: Outcome) {
        let _ = self.results.insert(code.into(), outcome);
    }

    /// Classify and record a finished case.
    ///
    /// Emits the failure line for failed cases and a `Code=…, Result=…`
    /// line for every tracked case. Returns the recorded outcome, or `None`
    /// when the report carries no code (silently dropped).
    pub fn record(&mut self, report: &CaseReport) -> Option<Outcome> {
        let code = report.code.as_deref()?;
        let outcome = report.outcome();

        if let Some(failure) = &report.failure {
            let line = failure_line(code, failure);
            eprintln!("{line}");
            tracing::error!(code, failure = %failure, "case failed");
        }
        println!("Code={code}, Result={outcome}");
        tracing::info!(code, outcome = %outcome, "case recorded");

        self.insert(code, outcome);
        Some(outcome)
    }

    /// Recorded outcome for a code
    #[must_use]
    pub fn outcome(&self, code: &str) -> Option<Outcome> {
        self.results.get(code).copied()
    }

    /// Number of tracked codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has been tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Per-outcome counts
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for outcome in self.results.values() {
            match outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Whether no tracked case failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results
            .values()
            .all(|outcome| *outcome != Outcome::Failed)
    }

    /// Iterate over `(code, outcome)` entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, Outcome)> {
        self.results.iter().map(|(code, outcome)| (code.as_str(), *outcome))
    }
}
