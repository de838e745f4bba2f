//! Module defining the seam between the reconciler and the import service.
//!
//! Every import call produces an explicit [`ImportOutcome`]. Transport adapters decide once,
//! in [`ImportOutcome::from_fault`], whether a fault carries a structured error report.

use crate::domain::{Behavior, EntityKind, EntityRecord, ErrorReport};

mod service;
mod validation;
mod wire;


pub use service::InProcessImporter;
pub use wire::{WireClient, WireEndpoint};

/// Something that accepts bulks of records and reports which of them failed.
pub trait Importer {
    /// Submits one bulk and blocks until the service replied.
    fn import(&mut self, request: ImportRequest<'_>) -> ImportOutcome;
}

impl<I: Importer + ?Sized> Importer for &mut I {
    fn import(&mut self, request: ImportRequest<'_>) -> ImportOutcome {
        (**self).import(request)
    }
}

/// One bulk of records together with what the service should do with them.
#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'a> {
    pub records: &'a [EntityRecord],
    pub kind: EntityKind,
    pub behavior: Behavior,
}

impl<'a> ImportRequest<'a> {
    pub fn new(records: &'a [EntityRecord], kind: EntityKind, behavior: Behavior) -> Self {
        Self {
            records,
            kind,
            behavior,
        }
    }

    /// Name of the service method handling this request.
    pub fn method(&self) -> &'static str {
        method_for(self.kind)
    }
}

pub(crate) fn method_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::AttributeSets => "import.importAttributeSets",
        EntityKind::Attributes => "import.importAttributes",
        EntityKind::AttributeAssociations => "import.importAttributeAssociations",
        EntityKind::Product | EntityKind::Customer | EntityKind::Category => {
            "import.importEntities"
        }
    }
}

/// Reply of the import service to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Success,
    /// The service rejected rows and said which ones, grouped by message.
    StructuredFailure(ErrorReport),
    /// The call failed for a reason that cannot be attributed to rows.
    OpaqueFailure(String),
}

impl ImportOutcome {
    /// Classifies a fault returned by a transport: a serialized error report becomes a
    /// structured failure, anything else is kept verbatim.
    pub fn from_fault(fault: &str) -> Self {
        match serde_json::from_str::<ErrorReport>(fault) {
            Ok(report) => ImportOutcome::StructuredFailure(report),
            Err(_) => ImportOutcome::OpaqueFailure(fault.to_string()),
        }
    }
}
