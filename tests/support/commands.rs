//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envseal command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - `--config` pointing at the test's config file
    /// - NO_COLOR so output can be matched literally
    /// - Current directory set to the test workspace
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envseal").expect("failed to find envseal binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("ENVSEAL_CONFIG", self.config_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("ENVSEAL_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envseal scan`.
    pub fn scan(&self) -> Output {
        self.cmd()
            .arg("scan")
            .output()
            .expect("failed to run envseal scan")
    }

    /// Shortcut for `envseal scan <dir> --json`.
    pub fn scan_dir_json(&self, dir: &str) -> Output {
        self.cmd()
            .args(["scan", dir, "--json"])
            .output()
            .expect("failed to run envseal scan --json")
    }

    /// Shortcut for `envseal normalize <file>`.
    pub fn normalize(&self, file: &str) -> Output {
        self.cmd()
            .args(["normalize", file])
            .output()
            .expect("failed to run envseal normalize")
    }

    /// Shortcut for `envseal diff <old> <new>`.
    pub fn diff(&self, old: &str, new: &str) -> Output {
        self.cmd()
            .args(["diff", old, new])
            .output()
            .expect("failed to run envseal diff")
    }

    /// Shortcut for `envseal status`.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run envseal status")
    }
}
