//! Module rendering import results for the operator.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::{
    Error,
    domain::{EntityKind, FailureReport},
    engine::BatchOutcome,
    run::RunSummary,
};


const RULE: &str = "=======================================";

/// One `<identity> : <message>` line per failed record, in report order.
pub fn failure_lines(report: &FailureReport) -> impl Iterator<Item = String> + '_ {
    report
        .iter()
        .map(|(identity, message)| format!("{identity} : {message}"))
}

/// Rough throughput figures of one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub kind: EntityKind,
    pub entity_count: usize,
    pub elapsed: Duration,
}

impl Statistics {
    pub fn average(&self) -> Option<f64> {
        (self.entity_count > 0).then(|| self.elapsed.as_secs_f64() / self.entity_count as f64)
    }

    pub fn per_second(&self) -> Option<f64> {
        let seconds = self.elapsed.as_secs_f64();
        (seconds > 0.0).then(|| self.entity_count as f64 / seconds)
    }

    pub fn per_hour(&self) -> Option<f64> {
        self.per_second().map(|rate| rate * 3600.0)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind.label();
        let plural = capitalized(label);
        writeln!(f, "========== Import statistics ==========")?;
        writeln!(f, "Total duration:\t\t{:.6}s", self.elapsed.as_secs_f64())?;
        writeln!(f, "Average per {label}:\t{}", seconds_or_na(self.average()))?;
        writeln!(f, "{plural}s per second:\t{}", rate_or_na(self.per_second()))?;
        writeln!(f, "{plural}s per hour:\t{}", rate_or_na(self.per_hour()))?;
        writeln!(f, "{RULE}")
    }
}

/// Writes what happened to one batch: notices, failed records, row count and statistics.
/// Aborted batches stop after the failures.
pub fn write_batch_report(
    out: &mut impl Write,
    kind: EntityKind,
    entity_count: usize,
    outcome: &BatchOutcome,
) -> std::io::Result<()> {
    for notice in &outcome.notices {
        writeln!(out, "{notice}")?;
    }
    for line in failure_lines(&outcome.failures) {
        writeln!(out, "{line}")?;
    }
    if outcome.is_aborted() {
        return Ok(());
    }

    writeln!(out, "Done! Import service reports {} rows.", outcome.rows)?;
    let statistics = Statistics {
        kind,
        entity_count,
        elapsed: outcome.elapsed,
    };
    writeln!(out, "{statistics}")
}

#[derive(Serialize)]
struct FailureRow<'a> {
    entity: &'a str,
    sub_type: &'a str,
    identity: &'a str,
    message: &'a str,
}

/// Writes every reconciled failure of the run as CSV.
pub fn write_failures_csv(writer: impl Write, summary: &RunSummary) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for batch in &summary.batches {
        for (identity, message) in batch.outcome.failures.iter() {
            wtr.serialize(FailureRow {
                entity: batch.kind.label(),
                sub_type: batch.sub_type.as_str(),
                identity,
                message,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn seconds_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}s"))
}

fn rate_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}"))
}
