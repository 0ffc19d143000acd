//! Integration tests for the zariski CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Write a problem file into `dir`
fn write_problem(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// Run the binary with an isolated config directory
fn zariski(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zariski"))
        .args(args)
        .env("XDG_CONFIG_HOME", dir)
        .env("HOME", dir)
        .output()
        .expect("Failed to execute zariski")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let output = zariski(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("zariski"));
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = zariski(dir.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Usage"));
    assert!(text.contains("groebner"));
    assert!(text.contains("closure"));
}

#[test]
fn test_groebner_text() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "circle.json",
        r#"{"variables": ["x", "y"], "polynomials": ["x^2 + y^2 - 1", "x - y"], "order": "lex"}"#,
    );
    let output = zariski(dir.path(), &["groebner", file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("order: lex"));
    assert!(text.contains("  x - y\n"));
    assert!(text.contains("  y^2 - 1/2\n"));
}

#[test]
fn test_groebner_json_and_order_flag() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "sys.json",
        r#"{"variables": ["x", "y"], "polynomials": ["x*y - 1", "y^2 - 1"]}"#,
    );
    let output = zariski(
        dir.path(),
        &["groebner", file.to_str().unwrap(), "--format", "json", "--order", "lex"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(v["order"], "lex");
    assert_eq!(v["truncated"], false);
    assert_eq!(v["basis"], serde_json::json!(["y^2 - 1", "x - y"]));
    assert!(v["stats"]["iterations"].as_u64().unwrap() >= 1);
}

#[test]
fn test_groebner_iteration_cap() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "cubic.json",
        r#"{"variables": ["x", "y", "z"], "polynomials": ["y - x^2", "z - x^3"], "order": "lex"}"#,
    );
    let output = zariski(
        dir.path(),
        &["groebner", file.to_str().unwrap(), "--max-iterations", "0", "-f", "json"],
    );
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(v["truncated"], true);
    assert_eq!(v["stats"]["iterations"], 0);
}

#[test]
fn test_groebner_unknown_variable() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "bad.json",
        r#"{"variables": ["x"], "polynomials": ["x + w"]}"#,
    );
    let output = zariski(dir.path(), &["groebner", file.to_str().unwrap(), "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown variable 'w'"));
}

#[test]
fn test_groebner_exponent_overflow() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "huge.json",
        r#"{"variables": ["y", "x"], "polynomials": ["y + x^4294967295", "y*x - 1"], "order": "lex"}"#,
    );
    let output = zariski(dir.path(), &["groebner", file.to_str().unwrap(), "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("exponent overflow"));
}

#[test]
fn test_groebner_truncation_warns_once() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "cubic.json",
        r#"{"variables": ["x", "y", "z"], "polynomials": ["y - x^2", "z - x^3"], "order": "lex"}"#,
    );
    let output = zariski(
        dir.path(),
        &["groebner", file.to_str().unwrap(), "--max-iterations", "0", "--no-color"],
    );
    assert!(output.status.success());
    assert_eq!(stderr(&output).matches("iteration cap reached").count(), 1);
    assert!(stdout(&output).contains("warning: iteration cap reached"));
}

#[test]
fn test_determinant_rational() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "m.json",
        r#"{"matrix": [[2, -1, 0], [1, 3, 4], [0, 5, -2]]}"#,
    );
    let output = zariski(dir.path(), &["det", file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "-54");
}

#[test]
fn test_determinant_number_field() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "phi.json",
        r#"{"matrix": [[[0, 1], 1], [1, 0]], "minimal_polynomial": [-1, -1, 1]}"#,
    );
    let output = zariski(dir.path(), &["det", file.to_str().unwrap(), "-f", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(v["determinant"], "-1");
    assert_eq!(v["field"], "Q(a), degree 2");
}

#[test]
fn test_inverse() {
    let dir = TempDir::new().unwrap();
    let q = write_problem(&dir, "q.json", r#"{"matrix": [["2", "0"], ["0", "4"]]}"#);
    let output = zariski(dir.path(), &["inverse", q.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "[1/2, 0]\n[0, 1/4]");

    let k = write_problem(
        &dir,
        "k.json",
        r#"{"matrix": [[[0, 1], 1], [1, 0]], "minimal_polynomial": ["-1", "-1", "1"]}"#,
    );
    let output = zariski(dir.path(), &["inverse", k.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "[0, 1]\n[1, -a]");
}

#[test]
fn test_inverse_singular() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(&dir, "s.json", r#"{"matrix": [[1, 2], [2, 4]]}"#);
    let output = zariski(dir.path(), &["inverse", file.to_str().unwrap(), "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("singular matrix"));
}

#[test]
fn test_closure_points() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "parabola.json",
        r#"{"points": [[0, 0], [1, 1], [2, 4], [3, 9], [4, 16]], "degree": 2}"#,
    );
    let output = zariski(dir.path(), &["closure", file.to_str().unwrap(), "-f", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(v["basis"], serde_json::json!(["x1^2 - x2"]));
    assert_eq!(v["points"], 5);
    assert_eq!(v["degree"], 2);
}

#[test]
fn test_closure_matrices() {
    let dir = TempDir::new().unwrap();
    let file = write_problem(
        &dir,
        "rot.json",
        r#"{
            "variables": ["a", "b", "c", "d"],
            "matrices": [[[1, 0], [0, 1]], [[0, -1], [1, 0]], [[-1, 0], [0, -1]], [[0, 1], [-1, 0]]],
            "degree": 1
        }"#,
    );
    let output = zariski(dir.path(), &["closure", file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("  a - d\n"));
    assert!(text.contains("  b + c\n"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_problem(&dir, "config.yaml", "format: json\norder: lex\n");
    let file = write_problem(
        &dir,
        "sys.json",
        r#"{"variables": ["x", "y"], "polynomials": ["x - y"]}"#,
    );
    let output = zariski(
        dir.path(),
        &["groebner", file.to_str().unwrap(), "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(v["order"], "lex");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = zariski(dir.path(), &["det", "/nonexistent/zariski/m.json", "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let output = zariski(dir.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("zariski"));
}
