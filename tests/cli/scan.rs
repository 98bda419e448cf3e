//! Tests for `envseal scan`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_scan_configured_repos() {
    let t = Test::with_repos(&["api", "web"]);
    t.write("api/.env", LOCAL_ENV);
    t.write("api/.env.prod", PROD_ENV);
    t.write("api/.env.example", "API_KEY=\n");
    t.write("web/node_modules/dep/.env", "X=1\n");
    t.write("web/.env", LOCAL_ENV);

    let output = t.scan();
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("api"));
    assert!(out.contains(".env.prod"));
    assert!(!out.contains(".env.example"));
    assert!(!out.contains("node_modules"));
}

#[test]
fn test_scan_directory_without_config_uses_defaults() {
    let t = Test::new();
    t.write("repo/.env", "A=1\n");
    t.write("repo/.git/.env", "A=1\n");
    t.write("repo/.env.example", "A=\n");

    let output = t.scan_dir_json("repo");
    assert_success(&output);

    let files: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let files = files.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["relative_path"], ".env");
    assert_eq!(files[0]["repository_name"], "repo");
}

#[test]
fn test_scan_directory_uses_configured_rules() {
    let t = Test::with_repos(&[]);
    let mut config = envseal::core::config::Config::load(t.config_path()).unwrap();
    config.scan.include_patterns = vec!["?*.env".to_string()];
    t.save_config(&config);
    t.write("repo/prod.env", "A=1\n");
    t.write("repo/.env", "A=1\n");

    let output = t.scan_dir_json("repo");
    assert_success(&output);

    let files: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(files.as_array().unwrap().len(), 1);
    assert_eq!(files[0]["relative_path"], "prod.env");
}

#[test]
fn test_scan_empty_directory() {
    let t = Test::new();
    std::fs::create_dir_all(t.path("empty")).unwrap();

    t.cmd()
        .args(["scan", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no env files found"));
}

#[test]
fn test_scan_nonexistent_directory_is_empty() {
    let t = Test::new();

    t.cmd()
        .args(["scan", "does-not-exist", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}
