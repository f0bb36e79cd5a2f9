//! CLI tests for fieldscout
//!
//! These drive the built binary the way a user would: inline JSON, files,
//! stdin, output formats, filters, and error reporting.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

// ============================================================================
// Test Infrastructure
// ============================================================================

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fieldscout"))
}

fn run_fieldscout(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute fieldscout")
}

fn run_fieldscout_with_stdin(args: &[&str], stdin_data: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn fieldscout");

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_data.as_bytes())
            .expect("Failed to write to stdin");
    }

    child.wait_with_output().expect("Failed to wait on child")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ============================================================================
// Single documents
// ============================================================================

#[test]
fn inline_json_text_output() {
    let output = run_fieldscout(&[r#"[{"id": 1, "name": "Ada"}]"#, "--no-color"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("root[].id"));
    assert!(stdout.contains("number"));
    assert!(stdout.contains("root[].name"));
    assert!(stdout.contains("string"));
}

#[test]
fn json_format_lists_descriptors() {
    let output = run_fieldscout(&[r#"[{"x": 1}, {"x": 2}]"#, "--format", "json"]);
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(
        parsed,
        serde_json::json!([{"field": "root[].x", "value": 1, "type": "number"}])
    );
}

#[test]
fn options_format_for_pickers() {
    let output = run_fieldscout(&[
        r#"{"data": [{"user": {"joined": "2021-06-01"}}]}"#,
        "--format",
        "options",
        "--type",
        "date",
    ]);
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(
        parsed,
        serde_json::json!([{
            "value": "root[].user.joined",
            "label": "user.joined",
            "badge": "date"
        }])
    );
}

#[test]
fn qualify_sets_names_array_properties() {
    let input = r#"{"data": [{"id": 1}], "included": [{"id": "u1"}]}"#;

    let plain = run_fieldscout(&[input, "--format", "json"]);
    assert!(plain.status.success());
    assert_eq!(
        stdout_json(&plain),
        serde_json::json!([{"field": "root[].id", "value": 1, "type": "number"}])
    );

    let qualified = run_fieldscout(&[input, "--format", "json", "--qualify-sets"]);
    assert!(qualified.status.success());
    let parsed = stdout_json(&qualified);
    assert_eq!(parsed[0]["field"], "root.data[].id");
    assert_eq!(parsed[1]["field"], "root.included[].id");
}

#[test]
fn objects_mode_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"db": {"host": "localhost", "port": 5432}}"#).unwrap();

    let output = run_fieldscout(&[path.to_str().unwrap(), "--objects", "--format", "json"]);
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    let fields: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["root.db", "root.db.host", "root.db.port"]);
}

#[test]
fn stdin_input_with_custom_root() {
    let output = run_fieldscout_with_stdin(
        &["--stdin", "--root", "rows", "--format", "json"],
        r#"[{"total": 10}]"#,
    );
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)[0]["field"], "rows[].total");
}

#[test]
fn output_file_is_written() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("catalog/fields.json");

    let output = run_fieldscout(&[
        r#"[{"ok": true}]"#,
        "--format",
        "json",
        "-o",
        out.to_str().unwrap(),
        "--quiet",
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(written[0]["type"], "boolean");
}

#[test]
fn stats_go_to_stderr() {
    let output = run_fieldscout(&[r#"[{"a": 1}]"#, "--format", "json", "--stats"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fields found: 1"));
    assert!(stderr.contains("Elements sampled: 1"));
    // stdout stays machine-readable
    stdout_json(&output);
}

#[test]
fn empty_object_prints_no_fields() {
    let output = run_fieldscout(&["{}"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No fields found"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn no_input_is_an_error() {
    let output = run_fieldscout(&[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No input provided"));
}

#[test]
fn invalid_json_reports_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[\n  {\"a\": }\n]").unwrap();

    let output = run_fieldscout(&[path.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JSON parse error at line 2"));
    assert!(stderr.contains("Tip:"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let output = run_fieldscout(&[missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
fn oversized_input_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.json");
    let records: Vec<String> = (0..200).map(|i| format!("{{\"id\": {}}}", i)).collect();
    fs::write(&path, format!("[{}]", records.join(","))).unwrap();

    let output = run_fieldscout(&[path.to_str().unwrap(), "--max-input-size", "1KB"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("too large"));
}

#[test]
fn invalid_sample_limit_is_rejected() {
    let output = run_fieldscout(&["[]", "--sample-limit", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Sample limit"));
}
