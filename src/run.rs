//! Module running a whole benchmark: generate, import and report every planned batch.

use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::{
    Error,
    config::RunConfig,
    domain::{EntityKind, SubType},
    engine::{BatchOutcome, import_batch},
    generate::plan,
    import::Importer,
    output::write_batch_report,
};

/// Outcome of one planned batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub kind: EntityKind,
    pub sub_type: SubType,
    pub outcome: BatchOutcome,
}

/// Outcomes of all batches of a run, in the order they were imported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: Vec<BatchSummary>,
}

impl RunSummary {
    /// Number of failed records over all batches.
    pub fn failure_count(&self) -> usize {
        self.batches
            .iter()
            .map(|batch| batch.outcome.failures.len())
            .sum()
    }
}

///
/// Runs every batch of `config` through `importer` and writes the console report to `out`.
///
/// Batches are generated one at a time with a generator seeded from the configuration, so two
/// runs with the same configuration submit the same records. The run stops with
/// [`Error::Aborted`] when a bulk fails without an error report and the configuration asks to
/// abort in that case. The error carries the summary of what was imported until then.
///
pub fn run(
    config: &RunConfig,
    importer: &mut impl Importer,
    out: &mut impl Write,
) -> Result<RunSummary, Error> {
    let batches = plan(&config.selection)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut summary = RunSummary::default();

    for planned in batches {
        let (kind, sub_type) = (planned.kind, planned.sub_type);

        writeln!(
            out,
            "Generating {} {sub_type} {}s...",
            config.entity_count,
            kind.label()
        )?;
        let batch = (planned.generator)(&mut rng, config.entity_count);

        writeln!(out, "Starting import...")?;
        info!(%kind, %sub_type, rows = batch.len(), "importing batch");
        let outcome = import_batch(
            &batch,
            kind,
            config.behavior,
            config.effective_bulk_size(),
            importer,
            config.on_opaque_failure,
        );
        info!(
            %kind,
            %sub_type,
            failures = outcome.failures.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "batch done"
        );

        write_batch_report(out, kind, config.entity_count, &outcome)?;

        let aborted = outcome.aborted.clone();
        summary.batches.push(BatchSummary {
            kind,
            sub_type,
            outcome,
        });
        if let Some(message) = aborted {
            return Err(Error::Aborted {
                kind,
                sub_type,
                message,
                summary: Box::new(summary),
            });
        }
    }

    Ok(summary)
}
