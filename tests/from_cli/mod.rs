//! Integration tests running the actual crate binary: the full path from flags to report.

use std::path::PathBuf;
use std::process::{Command, Output};

fn bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bulk-import-bench"))
        .args(args)
        .env_remove("IMPORT_API_USER")
        .env_remove("IMPORT_API_KEY")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to execute binary")
}

fn stdout_of(output: Output) -> String {
    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("binary output was not valid UTF-8")
}

/// Path in the temp dir that is unique to this test process.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bulk-import-bench-{}-{name}", std::process::id()))
}

#[test]
fn failing_products_end_up_on_stdout() {
    let stdout = stdout_of(bench(&[
        "--entities",
        "7",
        "--only",
        "product:simpleFail",
        "--max-bulk-size",
        "2",
    ]));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Generating 7 simpleFail products...");
    assert_eq!(lines[1], "Starting import...");

    let failures: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.starts_with("fail-"))
        .collect();
    assert_eq!(failures.len(), 3);
    assert!(failures[0].ends_with(" : Invalid value in 'price' column"));
    assert!(failures[1].ends_with(" : Required field 'name' has an empty value"));
    assert!(failures[2].ends_with(" : Invalid value in 'price' column"));

    assert!(stdout.contains("Done! Import service reports 7 rows.\n"));
    assert!(stdout.contains("Products per second:"));
}

#[test]
fn direct_mode_runs_every_selected_kind() {
    let stdout = stdout_of(bench(&[
        "--entities",
        "3",
        "--mode",
        "direct",
        "--only",
        "customer",
        "--only",
        "catalog_category",
    ]));

    assert!(stdout.starts_with("Generating 3 standard customers...\n"));
    assert!(stdout.contains("Generating 3 standard categorys...\n"));
    assert_eq!(stdout.matches("Done! Import service reports").count(), 2);
}

#[test]
fn failures_are_exported_as_csv() {
    let path = temp_path("failures.csv");
    let path_arg = path.to_str().expect("temp dir path is UTF-8");

    stdout_of(bench(&[
        "--entities",
        "7",
        "--only",
        "product:simpleFail",
        "--failures-csv",
        path_arg,
    ]));

    let csv = std::fs::read_to_string(&path).expect("failures CSV was written");
    std::fs::remove_file(&path).expect("failed to clean up failures CSV");

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4, "header and three failures, got:\n{csv}");
    assert_eq!(lines[0], "entity,sub_type,identity,message");
    assert!(lines[1..].iter().all(|line| line.starts_with("product,simpleFail,fail-")));
}

#[test]
fn wrong_api_key_fails_the_run() {
    let output = bench(&["--entities", "1", "--api-key", "wrong"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("authentication failed: Access denied."),
        "stderr: {stderr}"
    );
}

#[test]
fn unknown_selection_fails_before_importing() {
    let output = bench(&["--only", "customer:bundle"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no generator for bundle customer"), "stderr: {stderr}");
}
