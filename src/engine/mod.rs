//! Module for the core logic of the reconciler

use std::{str::FromStr, time::Duration};

use crate::domain::FailureReport;

mod logic;
mod orchestration;


pub use logic::{build_identity_index, chunk, map_failures};
pub use orchestration::import_batch;

/// What to do when a bulk fails without a structured error report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpaqueFailurePolicy {
    /// Report the message and submit the next bulk.
    #[default]
    Continue,
    /// Report the message and stop the whole run.
    AbortRun,
}

impl FromStr for OpaqueFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(OpaqueFailurePolicy::Continue),
            "abort" => Ok(OpaqueFailurePolicy::AbortRun),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

/// Result of submitting all bulks of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Failed records by identity, merged over all bulks.
    pub failures: FailureReport,
    /// Messages that could not be attributed to records, in the order they occurred.
    pub notices: Vec<String>,
    /// Number of rows in the batch.
    pub rows: usize,
    /// Number of bulks handed to the importer.
    pub bulks_submitted: usize,
    /// Wall time spent indexing and importing.
    pub elapsed: Duration,
    /// Set to the failure message when [`OpaqueFailurePolicy::AbortRun`] stopped the batch.
    pub aborted: Option<String>,
}

impl BatchOutcome {
    fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}
