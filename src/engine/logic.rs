//! Module with the pure reconciliation steps: chunking, identity indexing and failure mapping.

use std::num::NonZeroUsize;

use crate::{
    Error,
    domain::{EntityKind, EntityRecord, ErrorReport, FailureReport, IdentityIndex},
    error::malformed_report,
};

const CONTINUATION_PREFIX: &str = "Associated to previous ";

/// Splits `batch` into bulks of at most `max_size` records, preserving order.
/// `None` means unlimited: the whole batch is a single bulk. An empty batch has no bulks.
pub fn chunk(batch: &[EntityRecord], max_size: Option<NonZeroUsize>) -> Vec<&[EntityRecord]> {
    if batch.is_empty() {
        return Vec::new();
    }
    match max_size {
        Some(max) if batch.len() > max.get() => batch.chunks(max.get()).collect(),
        _ => vec![batch],
    }
}

/// Derives the human readable identity of every record in `bulk`.
///
/// Records without their own identity value are continuation rows of the last record that
/// had one and are labelled `Associated to previous <identity>`. Returns `None` for kinds
/// without an identity field.
pub fn build_identity_index(bulk: &[EntityRecord], kind: EntityKind) -> Option<IdentityIndex> {
    let field = kind.identity_field()?;

    let mut last_seen = String::new();
    let identities = bulk
        .iter()
        .map(|record| match record.identity(field) {
            Some(identity) => {
                last_seen.clone_from(&identity);
                identity
            }
            None => format!("{CONTINUATION_PREFIX}{last_seen}"),
        })
        .collect();

    Some(IdentityIndex::new(identities))
}

/// Maps the failing positions of `report` to the identities of `index`.
///
/// Messages are applied in report order, so when two positions share an identity the message
/// reported last wins. A position missing from the index makes the whole report malformed.
pub fn map_failures(report: &ErrorReport, index: &IdentityIndex) -> Result<FailureReport, Error> {
    let mut failures = FailureReport::new();
    for (message, positions) in report.iter() {
        for &position in positions {
            let identity = index
                .get(position)
                .ok_or_else(|| malformed_report(position, index.len()))?;
            failures.insert(identity, message);
        }
    }
    Ok(failures)
}
