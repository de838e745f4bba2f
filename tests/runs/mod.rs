//! Whole runs against the in-process service, directly and through the wire client.

use std::num::NonZeroUsize;

use bulk_import_bench::{
    Credentials, EntityKind, Error, ImportMode, ImportOutcome, ImportRequest, Importer,
    InProcessImporter, OpaqueFailurePolicy, RunConfig, RunSummary, Selector, SubType, WireClient,
    run, write_failures_csv,
};
use claims::{assert_err, assert_matches, assert_none, assert_ok, assert_some};

const ORPHAN_ROW: &str = "Row is not associated with any entity";

fn config(selection: Selector, entity_count: usize, max_bulk_size: usize) -> RunConfig {
    RunConfig {
        entity_count,
        max_bulk_size: NonZeroUsize::new(max_bulk_size),
        selection: vec![selection],
        ..RunConfig::default()
    }
}

fn remote_run(config: &RunConfig) -> (RunSummary, String) {
    let service = InProcessImporter::new(config.credentials.clone());
    let mut client = assert_ok!(WireClient::connect(service, &config.credentials));
    let mut out = Vec::new();

    let summary = assert_ok!(run(config, &mut client, &mut out));

    let service = assert_ok!(client.close());
    assert_eq!(service.open_sessions(), 0);
    (summary, assert_ok!(String::from_utf8(out)))
}

fn direct_run(config: &RunConfig) -> (RunSummary, String) {
    let mut service = InProcessImporter::new(config.credentials.clone());
    let mut out = Vec::new();
    let summary = assert_ok!(run(config, &mut service, &mut out));
    (summary, assert_ok!(String::from_utf8(out)))
}

fn sorted_failures(summary: &RunSummary) -> Vec<(String, String)> {
    let mut failures: Vec<(String, String)> = summary
        .batches
        .iter()
        .flat_map(|batch| batch.outcome.failures.iter())
        .map(|(identity, message)| (identity.to_string(), message.to_string()))
        .collect();
    failures.sort();
    failures
}

/// Service that stops answering once the run reaches customers.
struct FailsAtCustomers(InProcessImporter);

impl Importer for FailsAtCustomers {
    fn import(&mut self, request: ImportRequest<'_>) -> ImportOutcome {
        match request.kind {
            EntityKind::Customer => ImportOutcome::OpaqueFailure("Internal Error".to_string()),
            _ => self.0.import(request),
        }
    }
}

/// Importer failing every call the same way, like an unreachable service.
struct Unreachable;

impl Importer for Unreachable {
    fn import(&mut self, _request: ImportRequest<'_>) -> ImportOutcome {
        ImportOutcome::OpaqueFailure("Access denied.".to_string())
    }
}

#[test]
fn failing_products_are_reported_by_sku() {
    let config = config(
        Selector::sub_type(EntityKind::Product, SubType::SimpleFail),
        14,
        4,
    );

    let (summary, text) = remote_run(&config);

    let batch = &summary.batches[0];
    assert_eq!(batch.outcome.rows, 14);
    assert_eq!(batch.outcome.bulks_submitted, 4);
    assert_eq!(summary.failure_count(), 6);

    let messages: Vec<&str> = batch.outcome.failures.iter().map(|(_, m)| m).collect();
    assert_eq!(
        messages,
        [
            "Invalid value in 'price' column",
            "Required field 'name' has an empty value",
            "Invalid value in 'price' column",
            "Invalid value in 'price' column",
            "Required field 'name' has an empty value",
            "Invalid value in 'price' column",
        ]
    );
    for (identity, message) in batch.outcome.failures.iter() {
        assert!(identity.starts_with("fail-"), "unexpected identity {identity}");
        assert!(text.contains(&format!("{identity} : {message}\n")));
    }

    let lines: Vec<&str> = text.lines().take(2).collect();
    assert_eq!(lines, ["Generating 14 simpleFail products...", "Starting import..."]);
    assert!(text.contains("Done! Import service reports 14 rows.\n"));
}

#[test]
fn bulking_does_not_change_which_records_fail() {
    let bulked = config(
        Selector::sub_type(EntityKind::Product, SubType::SimpleFail),
        30,
        4,
    );
    let whole = RunConfig {
        mode: ImportMode::Direct,
        ..bulked.clone()
    };

    let (bulked, _) = remote_run(&bulked);
    let (whole, _) = direct_run(&whole);

    assert_eq!(whole.batches[0].outcome.bulks_submitted, 1);
    assert_eq!(sorted_failures(&bulked), sorted_failures(&whole));
}

#[test]
fn bulks_splitting_an_entity_report_orphaned_rows() {
    let config = config(
        Selector::sub_type(EntityKind::Product, SubType::Configurable),
        4,
        2,
    );

    let (summary, text) = remote_run(&config);
    let failures = &summary.batches[0].outcome.failures;

    // every orphaned row carries the same label, so they collapse into one failure
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.get("Associated to previous "), Some(ORPHAN_ROW));
    assert!(text.contains(&format!("Associated to previous  : {ORPHAN_ROW}\n")));
}

#[test]
fn unlimited_bulks_import_whole_entities() {
    let config = config(
        Selector::sub_type(EntityKind::Product, SubType::Configurable),
        4,
        0,
    );

    let (summary, _) = remote_run(&config);
    let outcome = &summary.batches[0].outcome;

    assert_eq!(outcome.bulks_submitted, 1);
    assert!(outcome.failures.is_empty());
    assert!(outcome.notices.is_empty());
}

#[test]
fn same_config_same_failures() {
    let config = config(
        Selector::sub_type(EntityKind::Product, SubType::SimpleFail),
        21,
        5,
    );

    let (first, _) = remote_run(&config);
    let (second, _) = remote_run(&config);

    assert_eq!(
        first.batches[0].outcome.failures,
        second.batches[0].outcome.failures
    );
}

#[test]
fn opaque_failures_are_printed_and_the_run_goes_on() {
    let config = config(Selector::kind(EntityKind::Customer), 3, 0);
    let mut out = Vec::new();

    let summary = assert_ok!(run(&config, &mut Unreachable, &mut out));

    let outcome = &summary.batches[0].outcome;
    assert_eq!(outcome.notices, ["Access denied."]);
    assert!(outcome.failures.is_empty());
    let text = assert_ok!(String::from_utf8(out));
    assert!(text.contains("Access denied.\nDone! Import service reports 6 rows.\n"));
}

#[test]
fn abort_policy_stops_at_the_first_opaque_failure() {
    let config = RunConfig {
        on_opaque_failure: OpaqueFailurePolicy::AbortRun,
        ..config(Selector::kind(EntityKind::Product), 10, 3)
    };
    let mut out = Vec::new();

    let err = assert_err!(run(&config, &mut Unreachable, &mut out));

    assert_matches!(
        err,
        Error::Aborted {
            kind: EntityKind::Product,
            sub_type: SubType::Simple,
            ref message,
            ..
        } if message == "Access denied."
    );
    let text = assert_ok!(String::from_utf8(out));
    assert_eq!(
        text,
        "Generating 10 simple products...\nStarting import...\nAccess denied.\n"
    );
}

#[test]
fn aborted_run_keeps_the_failures_reconciled_so_far() {
    let config = RunConfig {
        entity_count: 14,
        max_bulk_size: NonZeroUsize::new(4),
        on_opaque_failure: OpaqueFailurePolicy::AbortRun,
        selection: vec![
            Selector::sub_type(EntityKind::Product, SubType::SimpleFail),
            Selector::kind(EntityKind::Customer),
        ],
        ..RunConfig::default()
    };
    let mut importer = FailsAtCustomers(InProcessImporter::new(config.credentials.clone()));
    let mut out = Vec::new();

    let err = assert_err!(run(&config, &mut importer, &mut out));

    let summary = assert_some!(err.partial_summary());
    assert_eq!(summary.batches.len(), 2);
    assert_eq!(summary.batches[1].outcome.aborted.as_deref(), Some("Internal Error"));
    assert_eq!(summary.failure_count(), 6);

    let mut csv = Vec::new();
    assert_ok!(write_failures_csv(&mut csv, summary));
    let csv = assert_ok!(String::from_utf8(csv));
    assert_eq!(csv.lines().count(), 7, "header and six failures, got:\n{csv}");
    assert!(
        csv.lines()
            .skip(1)
            .all(|line| line.starts_with("product,simpleFail,fail-"))
    );
}

#[test]
fn errors_other_than_aborts_carry_no_summary() {
    let err = Error::Authentication("Access denied.".to_string());
    assert_none!(err.partial_summary());
}

#[test]
fn service_with_other_credentials_refuses_the_client() {
    let service = InProcessImporter::new(Credentials::new("apiUser", "rotated"));
    let result = WireClient::connect(service, &Credentials::default());
    assert_matches!(result, Err(Error::Authentication(_)));
}
