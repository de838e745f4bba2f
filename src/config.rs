//! Module for the run configuration and the command line that produces it

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::{
    domain::{Behavior, EntityKind, SubType},
    engine::OpaqueFailurePolicy,
    telemetry::LogFormat,
};

pub const DEFAULT_ENTITY_COUNT: usize = 5000;
pub const DEFAULT_SEED: u64 = 20_111_006;

/// Everything a benchmark run needs to know, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Logical entities generated per batch.
    pub entity_count: usize,
    /// Largest bulk handed to the importer. `None` submits each batch at once.
    pub max_bulk_size: Option<NonZeroUsize>,
    pub credentials: Credentials,
    pub mode: ImportMode,
    pub on_opaque_failure: OpaqueFailurePolicy,
    pub behavior: Behavior,
    pub seed: u64,
    /// Batches to run. Empty runs every entity kind with its default sub-types.
    pub selection: Vec<Selector>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entity_count: DEFAULT_ENTITY_COUNT,
            max_bulk_size: None,
            credentials: Credentials::default(),
            mode: ImportMode::default(),
            on_opaque_failure: OpaqueFailurePolicy::default(),
            behavior: Behavior::default(),
            seed: DEFAULT_SEED,
            selection: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Bulk size actually used: the direct path always imports a batch in one go.
    pub fn effective_bulk_size(&self) -> Option<NonZeroUsize> {
        match self.mode {
            ImportMode::Remote => self.max_bulk_size,
            ImportMode::Direct => None,
        }
    }
}

/// How records reach the import service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ImportMode {
    /// Through a login session over the wire protocol, in bulks.
    #[default]
    Remote,
    /// Calling the service in-process, one call per batch.
    Direct,
}

/// Login of the API user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            api_key: api_key.into(),
        }
    }

    pub fn matches(&self, user: &str, api_key: &str) -> bool {
        self.user == user && self.api_key == api_key
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("apiUser", "someApiKey123")
    }
}

// keeps the key out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"***")
            .finish()
    }
}

/// Selects an entity kind, optionally narrowed to one sub-type: `product` or `product:simple`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub kind: EntityKind,
    pub sub_type: Option<SubType>,
}

impl Selector {
    pub fn kind(kind: EntityKind) -> Self {
        Self {
            kind,
            sub_type: None,
        }
    }

    pub fn sub_type(kind: EntityKind, sub_type: SubType) -> Self {
        Self {
            kind,
            sub_type: Some(sub_type),
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, sub_type)) => Ok(Selector::sub_type(kind.parse()?, sub_type.parse()?)),
            None => Ok(Selector::kind(s.parse()?)),
        }
    }
}

/// Benchmarks bulk imports of generated e-commerce entities.
#[derive(Parser, Debug)]
#[command(name = "bulk-import-bench")]
pub struct Cli {
    /// Entities generated per entity kind and sub-type
    #[arg(long = "entities", default_value_t = DEFAULT_ENTITY_COUNT)]
    pub entity_count: usize,

    /// Rows per import call, 0 for unlimited
    #[arg(long, default_value_t = 0)]
    pub max_bulk_size: usize,

    /// API user
    #[arg(long, env = "IMPORT_API_USER", default_value = "apiUser")]
    pub api_user: String,

    /// API key of the user
    #[arg(long, env = "IMPORT_API_KEY", default_value = "someApiKey123", hide_env_values = true)]
    pub api_key: String,

    /// Import through the remote API or call the import service directly
    #[arg(long, value_enum, default_value_t = ImportMode::Remote)]
    pub mode: ImportMode,

    /// What to do when an import call fails without an error report: continue or abort
    #[arg(long, default_value = "continue")]
    pub on_opaque_failure: OpaqueFailurePolicy,

    /// Import behavior: append, replace or delete
    #[arg(long, default_value = "append")]
    pub behavior: Behavior,

    /// Seed of the data generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Only run the given kinds, e.g. `--only product:configurable --only customer`
    #[arg(long = "only")]
    pub selection: Vec<Selector>,

    /// Also write every failed record to this CSV file
    #[arg(long)]
    pub failures_csv: Option<PathBuf>,

    /// Log output format on stderr
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            entity_count: self.entity_count,
            max_bulk_size: NonZeroUsize::new(self.max_bulk_size),
            credentials: Credentials::new(&self.api_user, &self.api_key),
            mode: self.mode,
            on_opaque_failure: self.on_opaque_failure,
            behavior: self.behavior,
            seed: self.seed,
            selection: self.selection.clone(),
        }
    }
}
