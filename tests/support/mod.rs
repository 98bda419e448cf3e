//! Test support utilities for envseal integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use envseal::core::config::{Config, Repo};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own workspace dir and home dir. No process-global state
/// is mutated; child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Workspace holding repositories, vault and loose files
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Absolute path of a file in the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file in the workspace, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("failed to create parent dir");
        fs::write(&path, content).expect("failed to write file");
        path
    }

    /// Read a file from the workspace.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("failed to read file")
    }

    /// Where the config file for this test lives.
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("config.toml")
    }

    /// Write a config with one repository per name, each at `<workspace>/<name>`,
    /// and the vault at `<workspace>/vault`.
    pub fn with_repos(names: &[&str]) -> Self {
        let t = Self::new();
        let mut config = Config::new(t.path("vault"));
        for name in names {
            config.repos.push(Repo {
                name: name.to_string(),
                path: t.path(name),
            });
        }
        t.save_config(&config);
        t
    }

    /// Save a config to [`config_path`](Self::config_path).
    pub fn save_config(&self, config: &Config) {
        config
            .save(self.config_path())
            .expect("failed to save config");
    }

    /// Whether a file exists in the workspace.
    pub fn exists(&self, relative: &str) -> bool {
        Path::new(&self.path(relative)).exists()
    }
}
