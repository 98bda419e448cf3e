//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("Usage"));
    for command in ["scan", "normalize", "diff", "status", "completions"] {
        assert!(out.contains(command), "help missing {command}: {out}");
    }
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "envseal");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_envseal") || out.contains("complete"));
}

#[test]
fn test_completions_invalid_shell() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "tcsh"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_config_has_hint() {
    let t = Test::new();

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "config not found");
    assert_stderr_contains(&output, "--config");
}

#[test]
fn test_malformed_config_is_reported() {
    let t = Test::new();
    std::fs::write(t.config_path(), "vault_path = [").unwrap();

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_explicit_config_flag_wins() {
    let t = Test::with_repos(&["api"]);
    t.write("api/.env", "A=1\n");
    let elsewhere = t.home.path().join("other.toml");
    std::fs::rename(t.config_path(), &elsewhere).unwrap();

    let output = t
        .cmd()
        .args(["--config", elsewhere.to_str().unwrap(), "scan"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "api");
}
