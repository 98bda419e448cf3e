//! Status command - show what would be sealed into the vault.

use std::path::Path;
use std::process::ExitCode;

use crate::cli::{load_config, output};
use crate::core::plan;
use crate::error::Result;

/// Plan every configured repository and print the outcome.
///
/// Exits non-zero when any file could not be planned.
pub fn execute(config_path: Option<&Path>) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let plan = plan::plan(&config)?;

    output::header("envseal status");
    output::kv("vault:", output::path(&config.vault_path.display().to_string()));
    output::kv("repos:", config.repos.len());

    if config.repos.is_empty() {
        output::hint("add a [[repos]] entry to the config");
    }

    for repo in &config.repos {
        output::section(&repo.name);

        if plan.missing_repos.contains(&repo.name) {
            output::warn(&format!("path not found: {}", repo.path.display()));
            continue;
        }

        let mut any = false;
        for planned in plan.files_for(&repo.name) {
            any = true;
            output::kv(
                &planned.file.relative_path.display().to_string(),
                format!(
                    "→ {} ({} keys)",
                    output::path(&planned.destination.display().to_string()),
                    planned.mapping.len()
                ),
            );
        }

        for file in plan.unmapped.iter().filter(|f| f.repository_name == repo.name) {
            any = true;
            output::warn(&format!(
                "{}: no environment mapping",
                file.relative_path.display()
            ));
        }

        for failure in plan.failures.iter().filter(|f| f.repository == repo.name) {
            any = true;
            output::error(&failure.error.to_string());
        }

        if !any {
            output::dimmed("no env files found");
        }
    }

    println!();
    if plan.is_ok() {
        output::success(&format!("{} files ready", plan.files.len()));
        Ok(ExitCode::SUCCESS)
    } else {
        output::error(&format!(
            "{} files ready, {} failed",
            plan.files.len(),
            plan.failures.len()
        ));
        Ok(ExitCode::FAILURE)
    }
}
