//! Tests for `envseal diff`.

use crate::support::*;

#[test]
fn test_diff_lists_changed_keys() {
    let t = Test::new();
    t.write("old.env", "A=1\nB=2\nC=3\n");
    t.write("new.env", "B=2\nC=changed\nD=4\n");

    let output = t.diff("old.env", "new.env");
    assert_success(&output);
    assert_stdout_contains(&output, "+ D");
    assert_stdout_contains(&output, "- A");
    assert_stdout_contains(&output, "~ C");
    assert_stdout_contains(&output, "+1 added, 1 removed, 1 modified");
}

#[test]
fn test_diff_never_prints_values() {
    let t = Test::new();
    t.write("old.env", "TOKEN=old\n");
    t.write("new.env", &format!("TOKEN={}\nNEW={}\n", SECRET_VALUE, SECRET_VALUE));

    let output = t.diff("old.env", "new.env");
    assert_success(&output);
    assert_output_excludes(&output, SECRET_VALUE);

    let output = t
        .cmd()
        .args(["--verbose", "diff", "old.env", "new.env", "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_output_excludes(&output, SECRET_VALUE);
}

#[test]
fn test_diff_clean_when_only_formatting_differs() {
    let t = Test::new();
    t.write("old.env", "B=2\nA=\"1\"\n");
    t.write("new.env", "# reordered\nA='1'\nB=2\n");

    let output = t.diff("old.env", "new.env");
    assert_success(&output);
    assert_stdout_contains(&output, "no changes");
}

#[test]
fn test_diff_exit_code() {
    let t = Test::new();
    t.write("old.env", "A=1\n");
    t.write("new.env", "A=2\n");
    t.write("same.env", "A=1\n");

    let output = t
        .cmd()
        .args(["diff", "old.env", "new.env", "--exit-code"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = t
        .cmd()
        .args(["diff", "old.env", "same.env", "--exit-code"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_diff_missing_old_counts_as_empty() {
    let t = Test::new();
    t.write("new.env", "A=1\nB=2\n");

    let output = t.diff("never-pushed.env", "new.env");
    assert_success(&output);
    assert_stdout_contains(&output, "+2 added, 0 removed, 0 modified");
}

#[test]
fn test_diff_missing_new_fails() {
    let t = Test::new();
    t.write("old.env", "A=1\n");

    let output = t.diff("old.env", "gone.env");
    assert_failure(&output);
    assert_stderr_contains(&output, "env file not found");
}

#[test]
fn test_diff_json_output() {
    let t = Test::new();
    t.write("old.env", "A=1\n");
    t.write("new.env", "B=1\n");

    let output = t
        .cmd()
        .args(["diff", "old.env", "new.env", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["added"], serde_json::json!(["B"]));
    assert_eq!(json["removed"], serde_json::json!(["A"]));
    assert_eq!(json["modified"], serde_json::json!([]));
}
