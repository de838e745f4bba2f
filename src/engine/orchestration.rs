//! Module driving the bulks of a batch through the importer, one blocking call at a time

use std::{num::NonZeroUsize, time::Instant};

use tracing::{debug, warn};

use crate::{
    domain::{Behavior, EntityKind, EntityRecord, ErrorReport, IdentityIndex},
    engine::{
        BatchOutcome, OpaqueFailurePolicy,
        logic::{build_identity_index, chunk, map_failures},
    },
    import::{ImportOutcome, ImportRequest, Importer},
};

///
/// Submits `batch` in bulks of at most `max_bulk_size` records and reconciles every reported
/// failure with the identity of the record it belongs to.
///
/// Failures the importer reports with an error report end up in [`BatchOutcome::failures`].
/// Anything that cannot be attributed to a record (opaque failures, reports for kinds without
/// an identity field, malformed reports) is kept verbatim in [`BatchOutcome::notices`].
///
pub fn import_batch(
    batch: &[EntityRecord],
    kind: EntityKind,
    behavior: Behavior,
    max_bulk_size: Option<NonZeroUsize>,
    importer: &mut impl Importer,
    policy: OpaqueFailurePolicy,
) -> BatchOutcome {
    let started = Instant::now();
    let mut outcome = BatchOutcome::new(batch.len());

    let bulks = chunk(batch, max_bulk_size);
    debug!(%kind, rows = batch.len(), bulks = bulks.len(), "submitting batch");

    let mut offset = 0;
    for (bulk_no, bulk) in bulks.into_iter().enumerate() {
        let index = build_identity_index(bulk, kind);
        outcome.bulks_submitted += 1;

        match importer.import(ImportRequest::new(bulk, kind, behavior)) {
            ImportOutcome::Success => {
                debug!(bulk = bulk_no, rows = bulk.len(), "bulk imported");
            }
            ImportOutcome::StructuredFailure(report) => {
                debug!(bulk = bulk_no, messages = report.len(), "bulk rejected rows");
                reconcile(&mut outcome, &report, index.as_ref(), bulk_no, offset);
            }
            ImportOutcome::OpaqueFailure(message) => {
                warn!(bulk = bulk_no, %message, "bulk failed without an error report");
                outcome.notices.push(message.clone());
                if policy == OpaqueFailurePolicy::AbortRun {
                    outcome.aborted = Some(message);
                    break;
                }
            }
        }

        offset += bulk.len();
    }

    outcome.elapsed = started.elapsed();
    outcome
}

fn reconcile(
    outcome: &mut BatchOutcome,
    report: &ErrorReport,
    index: Option<&IdentityIndex>,
    bulk_no: usize,
    offset: usize,
) {
    let Some(index) = index else {
        debug!("no identity field, reporting messages as they are");
        surface_unattributed(outcome, report, bulk_no, offset);
        return;
    };

    match map_failures(report, index) {
        Ok(failures) => outcome.failures.merge(failures),
        Err(err) => {
            warn!("{err}");
            surface_unattributed(outcome, report, bulk_no, offset);
        }
    }
}

// Positions are shifted to the batch so that the rows can be found in the generated data.
// A position too large to shift is reported relative to its bulk.
fn surface_unattributed(
    outcome: &mut BatchOutcome,
    report: &ErrorReport,
    bulk_no: usize,
    offset: usize,
) {
    for (message, positions) in report.iter() {
        let rows = positions
            .iter()
            .map(|&position| match position.checked_add(offset) {
                Some(row) => row.to_string(),
                None => format!("{position} in bulk {bulk_no}"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        outcome.notices.push(format!("{message} (rows {rows})"));
    }
}
