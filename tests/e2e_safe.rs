mod common;
use common::cli::{ExtractWorkspace, SAFE_BIN, run_extract, run_extract_with_args};
use rusqlite::Connection;
use serde_json::json;
use std::fs;
use std::time::{Duration, Instant};

#[test]
fn test_safe_export_writes_root_level_file() {
    let workspace = ExtractWorkspace::with_database(
        "CREATE TABLE _prisma_migrations (id TEXT);
         INSERT INTO _prisma_migrations VALUES ('init');
         CREATE TABLE BlogPost (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT);
         INSERT INTO BlogPost (title) VALUES ('First'), ('Second');
         CREATE TABLE FAQ (id INTEGER);",
    );

    let output = run_extract(&workspace, SAFE_BIN, "safe");
    assert!(output.status.success(), "safe export failed: {}", output.stderr);

    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Attempting to connect to prisma/dev.db (read-only)...",
            "Connected. Fetching tables...",
            "Extracting BlogPost...",
            "Extracting FAQ...",
            "DONE! Saved 2 tables to prisma_full_data.json",
        ]
    );

    assert_eq!(
        workspace.read_json(&workspace.safe_output()),
        json!({
            "BlogPost": [{"id": 1, "title": "First"}, {"id": 2, "title": "Second"}],
            "FAQ": []
        })
    );
    assert!(!workspace.exclusive_output().exists());
}

#[test]
fn test_safe_export_does_not_modify_source() {
    let workspace = ExtractWorkspace::with_database(
        "CREATE TABLE User (id INTEGER, email TEXT); INSERT INTO User VALUES (1, 'a@b.c');",
    );
    let before = fs::read(workspace.db_path()).unwrap();

    let output = run_extract(&workspace, SAFE_BIN, "safe");
    assert!(output.status.success());

    assert_eq!(fs::read(workspace.db_path()).unwrap(), before);
    assert!(!workspace.root.join("prisma/dev.db-journal").exists());
}

#[test]
fn test_missing_database_fails_cleanly() {
    let workspace = ExtractWorkspace::new();

    let output = run_extract(&workspace, SAFE_BIN, "missing");
    assert!(output.status.success());
    assert!(
        output
            .stdout
            .contains("FAILED: Database not found at prisma/dev.db")
    );
    assert!(!workspace.safe_output().exists());
}

#[test]
fn test_locked_database_fails_fast_without_crashing() {
    let workspace = ExtractWorkspace::with_database(
        "CREATE TABLE SiteSetting (key TEXT, value TEXT); INSERT INTO SiteSetting VALUES ('k', 'v');",
    );
    let holder = Connection::open(workspace.db_path()).unwrap();
    holder.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let started = Instant::now();
    let output = run_extract(&workspace, SAFE_BIN, "locked");
    assert!(started.elapsed() < Duration::from_secs(20));

    assert!(output.status.success());
    assert!(output.stdout.contains("FAILED:"), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("locked"), "stdout: {}", output.stdout);
    assert!(!workspace.safe_output().exists());

    holder.execute_batch("ROLLBACK;").unwrap();
}

#[test]
fn test_reads_while_another_connection_is_open() {
    let workspace = ExtractWorkspace::with_database(
        "CREATE TABLE Testimonial (id INTEGER, quote TEXT); INSERT INTO Testimonial VALUES (1, 'Great');",
    );
    let _writer = Connection::open(workspace.db_path()).unwrap();

    let output = run_extract(&workspace, SAFE_BIN, "shared");
    assert!(output.status.success());
    assert!(output.stdout.contains("DONE!"), "stdout: {}", output.stdout);
    assert_eq!(
        workspace.read_json(&workspace.safe_output()),
        json!({"Testimonial": [{"id": 1, "quote": "Great"}]})
    );
}

#[test]
fn test_unknown_argument_is_reported_without_failing() {
    let workspace =
        ExtractWorkspace::with_database("CREATE TABLE FAQ (id INTEGER); INSERT INTO FAQ VALUES (1);");

    let output = run_extract_with_args(&workspace, SAFE_BIN, &["--bogus"], "safe bogus flag");
    assert!(output.status.success(), "exit status: {:?}", output.status);
    assert!(
        output.stdout.starts_with("FAILED: "),
        "stdout: {}",
        output.stdout
    );
    assert!(output.stdout.contains("--bogus"));
    assert!(!workspace.safe_output().exists());
}
