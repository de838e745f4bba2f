//! Module defining the errors which are exposed to the users of the crate

use crate::{
    domain::{EntityKind, SubType},
    run::RunSummary,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The import service reported a failing row position that does not exist in the submitted bulk
    #[error("malformed error report: position {position} is outside of a bulk of {bulk_len} rows")]
    MalformedErrorReport { position: usize, bulk_len: usize },

    /// No generator is registered for the requested entity kind and sub-type
    #[error("no generator for {sub_type} {kind}")]
    UnknownGenerator { kind: EntityKind, sub_type: SubType },

    /// The import service refused to open a session
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// An unstructured import failure stopped the run. `summary` holds the batches imported
    /// so far, the aborted one included.
    #[error("run aborted while importing {sub_type} {kind}: {message}")]
    Aborted {
        kind: EntityKind,
        sub_type: SubType,
        message: String,
        summary: Box<RunSummary>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// What was reconciled before the run stopped, if it stopped because of an import failure.
    pub fn partial_summary(&self) -> Option<&RunSummary> {
        match self {
            Error::Aborted { summary, .. } => Some(&**summary),
            _ => None,
        }
    }
}

pub(crate) fn malformed_report(position: usize, bulk_len: usize) -> Error {
    Error::MalformedErrorReport { position, bulk_len }
}
