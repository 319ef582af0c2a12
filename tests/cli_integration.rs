//! CLI integration tests for task-analyzer
//!
//! These tests drive the binary end to end: document in, scored tasks or a
//! typed error out.

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance isolated from any user or project config
fn analyzer_cmd(dir: &TempDir) -> assert_cmd::Command {
    let config = dir.path().join("empty.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("task-analyzer"));
    cmd.current_dir(dir.path())
        .env("TASK_ANALYZER_CONFIG", config)
        .env_remove("TASK_ANALYZER_LOG");
    cmd
}

/// Write a task document into the temp dir
fn write_doc(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stderr_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stderr).unwrap()
}

const TWO_TASKS: &str = r#"[
  {"id": 1, "title": "A", "due_date": null, "estimated_hours": 2, "importance": 3, "dependencies": []},
  {"id": 2, "title": "B", "due_date": null, "estimated_hours": 1, "importance": 5, "dependencies": [1]}
]"#;

const CYCLE: &str = r#"[
  {"id": 1, "title": "A", "estimated_hours": 1, "importance": 1, "dependencies": [2]},
  {"id": 2, "title": "B", "estimated_hours": 1, "importance": 1, "dependencies": [1]}
]"#;

// =============================================================================
// Analyze
// =============================================================================

#[test]
fn test_analyze_orders_dependency_first() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--strategy", "importance-weighted", "--format", "json"])
        .arg(&doc)
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    let tasks = json["tasks"].as_array().unwrap();

    assert_eq!(json["strategy"], "importance-weighted");
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["order"], 0);
    assert_eq!(tasks[1]["id"], 2);
    assert_eq!(tasks[1]["order"], 1);
    assert!(tasks[1]["score"].as_f64().unwrap() > tasks[0]["score"].as_f64().unwrap());
}

#[test]
fn test_analyze_text_output() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    analyzer_cmd(&dir)
        .args(["analyze", "--strategy", "importance-weighted", "--today", "2025-03-01"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy: importance-weighted (as of 2025-03-01)"))
        .stdout(predicate::str::contains("ORDER"))
        .stdout(predicate::str::contains("Medium"))
        .stdout(predicate::str::contains("no other task waits on it"));
}

#[test]
fn test_analyze_reads_stdin() {
    let dir = TempDir::new().unwrap();

    let output = analyzer_cmd(&dir)
        .args(["analyze", "-", "--format", "json", "--strategy", "critical-path"])
        .write_stdin(TWO_TASKS)
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    assert_eq!(json["tasks"][0]["score"], 3.0);
}

#[test]
fn test_analyze_yaml_document() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        &dir,
        "tasks.yml",
        "strategy: critical-path\ntasks:\n  - id: design\n    title: Design\n    estimated_hours: 2\n    importance: 3\n  - id: build\n    title: Build\n    estimated_hours: 5\n    importance: 4\n    dependencies: [design]\n",
    );

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--format", "json"])
        .arg(&doc)
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    assert_eq!(json["strategy"], "critical-path");
    assert_eq!(json["tasks"][0]["id"], "design");
    assert_eq!(json["tasks"][0]["score"], 7.0);
}

#[test]
fn test_analyze_empty_list() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", "[]");

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--format", "json"])
        .arg(&doc)
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    assert_eq!(json["tasks"], Value::Array(vec![]));

    analyzer_cmd(&dir)
        .arg("analyze")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks to analyze."));
}

#[test]
fn test_analyze_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    let run = || {
        analyzer_cmd(&dir)
            .args(["analyze", "--format", "json", "--today", "2025-03-01"])
            .arg(&doc)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_cycle_fails_with_both_ids() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", CYCLE);

    analyzer_cmd(&dir)
        .arg("analyze")
        .arg(&doc)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Dependency cycle detected: 1 -> 2 -> 1"));
}

#[test]
fn test_errors_are_typed_in_json_mode() {
    let dir = TempDir::new().unwrap();
    let cycle = write_doc(&dir, "cycle.json", CYCLE);
    let unknown_dep = write_doc(
        &dir,
        "unknown.json",
        r#"[{"id": 1, "title": "A", "estimated_hours": 1, "importance": 1, "dependencies": [42]}]"#,
    );
    let malformed = write_doc(
        &dir,
        "malformed.json",
        r#"[{"id": 1, "title": "A", "estimated_hours": -4, "importance": 1}]"#,
    );
    let duplicate = write_doc(
        &dir,
        "duplicate.json",
        r#"[{"id": 1, "title": "A", "estimated_hours": 1, "importance": 1},
            {"id": 1, "title": "B", "estimated_hours": 1, "importance": 1}]"#,
    );

    for (doc, kind) in [
        (&cycle, "DependencyCycle"),
        (&unknown_dep, "UnknownDependency"),
        (&malformed, "MalformedTask"),
        (&duplicate, "DuplicateTaskId"),
    ] {
        let output = analyzer_cmd(&dir)
            .args(["analyze", "--format", "json"])
            .arg(doc)
            .assert()
            .failure();

        let json = stderr_json(output.get_output());
        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], kind, "document {}", doc.display());
    }

    let output = analyzer_cmd(&dir)
        .args(["validate", "--format", "json"])
        .arg(&cycle)
        .assert()
        .failure();
    assert_eq!(stderr_json(output.get_output())["tasks"], serde_json::json!([1, 2]));

    let output = analyzer_cmd(&dir)
        .args(["validate", "--format", "json"])
        .arg(&unknown_dep)
        .assert()
        .failure();
    assert_eq!(stderr_json(output.get_output())["tasks"], serde_json::json!([1, 42]));
}

#[test]
fn test_unknown_strategy_rejected() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--strategy", "alphabetical", "--format", "json"])
        .arg(&doc)
        .assert()
        .failure();

    let json = stderr_json(output.get_output());
    assert_eq!(json["kind"], "UnknownStrategy");
    assert!(json["error"].as_str().unwrap().contains("alphabetical"));
}

#[test]
fn test_unknown_strategy_outranks_task_errors() {
    let dir = TempDir::new().unwrap();
    let ill_typed = r#"[{"title": "x", "estimated_hours": "two", "importance": 1}]"#;
    let doc = write_doc(&dir, "tasks.json", ill_typed);
    let named = write_doc(
        &dir,
        "named.json",
        &format!(r#"{{"strategy": "coin-flip", "tasks": {}}}"#, ill_typed),
    );

    // From the command line
    let output = analyzer_cmd(&dir)
        .args(["analyze", "--strategy", "coin-flip", "--format", "json"])
        .arg(&doc)
        .assert()
        .failure();
    assert_eq!(stderr_json(output.get_output())["kind"], "UnknownStrategy");

    // From the document
    let output = analyzer_cmd(&dir)
        .args(["analyze", "--format", "json"])
        .arg(&named)
        .assert()
        .failure();
    assert_eq!(stderr_json(output.get_output())["kind"], "UnknownStrategy");

    // Checked before the document is even opened
    analyzer_cmd(&dir)
        .args(["suggest", "--strategy", "coin-flip", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown strategy 'coin-flip'"));
}

#[test]
fn test_invalid_document_rejected() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", r#"{"items": []}"#);

    analyzer_cmd(&dir)
        .arg("analyze")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request document: missing 'tasks'"));
}

#[test]
fn test_missing_file_reported() {
    let dir = TempDir::new().unwrap();

    analyzer_cmd(&dir)
        .args(["analyze", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read task document"));
}

// =============================================================================
// Suggest / Validate / Strategies
// =============================================================================

#[test]
fn test_suggest_returns_top_tasks() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        &dir,
        "tasks.json",
        r#"[
          {"id": 1, "title": "Low", "estimated_hours": 1, "importance": 1},
          {"id": 2, "title": "High", "estimated_hours": 1, "importance": 9},
          {"id": 3, "title": "Mid", "estimated_hours": 1, "importance": 5}
        ]"#,
    );

    let output = analyzer_cmd(&dir)
        .args(["suggest", "--limit", "2", "--strategy", "high-impact", "--format", "json"])
        .arg(&doc)
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    assert_eq!(json["total"], 3);
    let ids: Vec<i64> = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_suggest_rejects_zero_limit() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    analyzer_cmd(&dir)
        .args(["suggest", "--limit", "0"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--limit must be at least 1"));
}

#[test]
fn test_validate_prints_order() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        &dir,
        "tasks.json",
        r#"[
          {"id": "ship", "title": "Ship", "estimated_hours": 1, "importance": 1, "dependencies": ["build"]},
          {"id": "build", "title": "Build", "estimated_hours": 1, "importance": 1}
        ]"#,
    );

    analyzer_cmd(&dir)
        .arg("validate")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Order: build -> ship"));

    let output = analyzer_cmd(&dir)
        .args(["validate", "--format", "json"])
        .arg(&doc)
        .assert()
        .success();
    let lines: Vec<Value> = String::from_utf8_lossy(&output.get_output().stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["valid"], true);
    assert_eq!(lines[0]["order"], serde_json::json!(["build", "ship"]));
}

#[test]
fn test_validate_reports_cycle() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", CYCLE);

    analyzer_cmd(&dir)
        .arg("validate")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency cycle detected"));
}

#[test]
fn test_strategies_lists_all() {
    let dir = TempDir::new().unwrap();

    analyzer_cmd(&dir)
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("urgency"))
        .stdout(predicate::str::contains("importance-weighted"))
        .stdout(predicate::str::contains("critical-path"))
        .stdout(predicate::str::contains("smart-balance").and(predicate::str::contains("(default)")));

    let output = analyzer_cmd(&dir)
        .args(["strategies", "--format", "json"])
        .assert()
        .success();
    let json = stdout_json(output.get_output());
    assert_eq!(json.as_array().unwrap().len(), 7);
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_sets_default_strategy() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);
    let config = write_doc(&dir, "custom.toml", "default_strategy = \"critical-path\"\n");

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--format", "json", "--config"])
        .arg(&config)
        .arg(&doc)
        .assert()
        .success();

    assert_eq!(stdout_json(output.get_output())["strategy"], "critical-path");
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_doc(&dir, "bad.toml", "[weights]\nunblock = -2.0\n");

    analyzer_cmd(&dir)
        .args(["strategies", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weights.unblock"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "tasks.json", TWO_TASKS);

    let output = analyzer_cmd(&dir)
        .args(["analyze", "--verbose", "--format", "json"])
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("analysis complete"));

    // stdout stays machine-readable
    stdout_json(output.get_output());
}
