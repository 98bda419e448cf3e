//! Tests for `envseal normalize`.

use crate::support::*;

#[test]
fn test_normalize_prints_canonical_text() {
    let t = Test::new();
    t.write(".env", MESSY_ENV);

    let output = t.normalize(".env");
    assert_success(&output);
    assert_eq!(stdout(&output), MESSY_ENV_CANONICAL);
}

#[test]
fn test_normalize_is_idempotent() {
    let t = Test::new();
    t.write(".env", MESSY_ENV_CANONICAL);

    let output = t.normalize(".env");
    assert_success(&output);
    assert_eq!(stdout(&output), MESSY_ENV_CANONICAL);
}

#[test]
fn test_normalize_writes_output_file() {
    let t = Test::new();
    t.write(".env", "B=2\nA=1\n");

    let output = t
        .cmd()
        .args(["normalize", ".env", "--output", "out/normalized.env"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "wrote 2 keys");
    assert_eq!(t.read("out/normalized.env"), "A=1\nB=2\n");
}

#[test]
fn test_normalize_missing_file() {
    let t = Test::new();

    let output = t.normalize("nope.env");
    assert_failure(&output);
    assert_stderr_contains(&output, "env file not found");
}

#[test]
fn test_normalize_malformed_file_reports_line() {
    let t = Test::new();
    t.write(".env", "GOOD=1\nthis line is broken\n");

    let output = t
        .cmd()
        .args(["normalize", ".env", "--output", "out.env"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "line 2");
    assert_stderr_contains(&output, "this <redacted>");
    assert_output_excludes(&output, "line is broken");
    assert!(!t.exists("out.env"), "nothing should be written");
}
