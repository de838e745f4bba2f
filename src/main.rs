use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use bulk_import_bench::{
    Cli, ImportMode, InProcessImporter, RunSummary, WireClient, run, setup_logging,
    write_failures_csv,
};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_format)?;

    let config = cli.run_config();
    let service = InProcessImporter::new(config.credentials.clone());
    let mut stdout = std::io::stdout().lock();

    let result = match config.mode {
        ImportMode::Remote => {
            let mut client = WireClient::connect(service, &config.credentials)?;
            let result = run(&config, &mut client, &mut stdout);
            // the session is ended even when the run was aborted
            client.close()?;
            result
        }
        ImportMode::Direct => {
            let mut service = service;
            run(&config, &mut service, &mut stdout)
        }
    };

    // an aborted run still exports what was reconciled before it stopped
    let summary = match &result {
        Ok(summary) => Some(summary),
        Err(err) => err.partial_summary(),
    };
    if let (Some(path), Some(summary)) = (&cli.failures_csv, summary) {
        export_failures(path, summary)?;
    }

    result?;
    Ok(())
}

fn export_failures(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_failures_csv(file, summary)?;
    tracing::info!(
        failures = summary.failure_count(),
        path = %path.display(),
        "failures exported"
    );
    Ok(())
}
