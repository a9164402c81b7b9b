//! Data-driven suite runner.
//!
//! A [`DataSuite`] binds a resolved [`DataSet`] to a case body and runs one
//! invocation per row, sequentially, against a shared session. The row's
//! `code` is bound at registration time; the body's verdict (an `Err`
//! return or a panic from an `assert!`-style check) is captured and
//! recorded into the [`ResultTracker`] the caller owns. Dataset resolution
//! failures are configuration errors and abort before any case body runs.

use crate::dataset::{DataRow, DataSet};
use crate::result::PagewrightResult;
use crate::tracker::{CaseReport, Outcome, ResultTracker};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Result of one finished case
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// Bound case code
    pub code: String,
    /// Classified outcome
    pub outcome: Outcome,
    /// Captured failure text, when any
    pub error: Option<String>,
    /// Case duration
    pub duration: Duration,
}

/// Results from running a suite
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Per-case results, in row order
    pub results: Vec<CaseResult>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Whether no case failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.outcome != Outcome::Failed)
    }

    /// Number of cases run
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the suite ran no cases
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of passed cases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(Outcome::Passed)
    }

    /// Number of failed cases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(Outcome::Failed)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// A suite of parametrized cases driven by one dataset
#[derive(Debug, Clone)]
pub struct DataSuite {
    name: String,
    dataset: DataSet,
}

impl DataSuite {
    /// Create a suite over an already-loaded dataset
    #[must_use]
    pub fn new(name: impl Into<String>, dataset: DataSet) -> Self {
        Self {
            name: name.into(),
            dataset,
        }
    }

    /// Resolve the dataset for a test file under a data root.
    ///
    /// Missing folder/file aborts here, before any case body executes.
    pub fn resolve(
        data_dir: impl AsRef<std::path::Path>,
        env: crate::config::Environment,
        test_file: &str,
    ) -> PagewrightResult<Self> {
        let dataset = DataSet::load(data_dir, env, test_file)?;
        Ok(Self::new(test_file, dataset))
    }

    /// Suite name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dataset driving the suite
    #[must_use]
    pub const fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    /// Run one case body invocation per row, recording into `tracker`.
    ///
    /// Both `Err` returns and panics surface as failures; the row's `code`
    /// is bound before the body runs.
    pub fn run<F>(&self, tracker: &mut ResultTracker, mut body: F) -> SuiteResults
    where
        F: FnMut(&DataRow) -> PagewrightResult<()>,
    {
        let suite_start = Instant::now();
        let mut results = Vec::with_capacity(self.dataset.len());

        for row in &self.dataset {
            let code = row.code().to_string();
            tracing::info!(suite = %self.name, code = %code, "case start");
            let start = Instant::now();

            let verdict = catch_unwind(AssertUnwindSafe(|| body(row)));
            let report = match verdict {
                Ok(Ok(())) => CaseReport::passed(code.as_str()),
                Ok(Err(error)) => CaseReport::failed(code.as_str(), error.to_string()),
                Err(panic) => CaseReport::failed(code.as_str(), panic_message(panic.as_ref())),
            };

            let outcome = report.outcome();
            let _ = tracker.record(&report);
            results.push(CaseResult {
                code,
                outcome,
                error: report.failure,
                duration: start.elapsed(),
            });
        }

        let suite = SuiteResults {
            suite_name: self.name.clone(),
            results,
            duration: suite_start.elapsed(),
        };
        tracing::info!(
            suite = %suite.suite_name,
            cases = suite.len(),
            passed = suite.passed_count(),
            failed = suite.failed_count(),
            "suite finished"
        );
        suite
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "case panicked".to_string()
    }
}
