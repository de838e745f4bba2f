//! Benchmarks bulk imports of generated e-commerce entities and reports which records failed.
//!
//! The import service reports failing rows by their position in the submitted bulk. The crate
//! splits batches into bulks ([`chunk`]), labels every row of a bulk with a human readable
//! identity ([`build_identity_index`]) and maps the reported positions back to those identities
//! ([`map_failures`]). [`run`] ties this together with data generation and statistics.
//!
//! # Example
//!
//! ```no_run
//! use bulk_import_bench::{Credentials, InProcessImporter, RunConfig, WireClient, run};
//!
//! let config = RunConfig::default();
//! let service = InProcessImporter::new(Credentials::default());
//! let mut client = WireClient::connect(service, &config.credentials).unwrap();
//!
//! let summary = run(&config, &mut client, &mut std::io::stdout()).unwrap();
//! eprintln!("{} records failed", summary.failure_count());
//! client.close().unwrap();
//! ```

mod config;
mod domain;
mod engine;
mod error;
mod generate;
mod import;
mod output;
mod run;
mod telemetry;

pub use config::{Cli, Credentials, ImportMode, RunConfig, Selector};
pub use domain::{
    Behavior, EntityBatch, EntityKind, EntityRecord, ErrorReport, FailureReport, FieldValue,
    IdentityIndex, SubType,
};
pub use engine::{
    BatchOutcome, OpaqueFailurePolicy, build_identity_index, chunk, import_batch, map_failures,
};
pub use error::Error;
pub use generate::{GeneratorFn, PlannedBatch, generator_for, plan};
pub use import::{
    ImportOutcome, ImportRequest, Importer, InProcessImporter, WireClient, WireEndpoint,
};
pub use output::{Statistics, failure_lines, write_batch_report, write_failures_csv};
pub use run::{BatchSummary, RunSummary, run};
pub use telemetry::{LogFormat, setup_logging};
