//! Push planning.
//!
//! Runs scan → parse → destination mapping for every configured repository.
//! One bad repository or file never stops the rest: failures are collected
//! next to the successfully planned files.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::config::{Config, Repo};
use crate::core::env::{self, EnvMapping};
use crate::core::rules::ScanRules;
use crate::core::scanner::{self, DiscoveredFile};
use crate::error::{Error, PlanError, Result};

/// A discovered file ready to be sealed into the vault.
#[derive(Debug)]
pub struct PlannedFile {
    pub file: DiscoveredFile,
    /// Logical environment name (e.g. `prod`).
    pub environment: String,
    /// Path of the file inside the vault.
    pub destination: PathBuf,
    /// Parsed contents.
    pub mapping: EnvMapping,
}

/// A file or repository that could not be planned.
#[derive(Debug)]
pub struct Failure {
    pub repository: String,
    pub path: PathBuf,
    pub error: Error,
}

/// Result of planning every configured repository.
#[derive(Debug, Default)]
pub struct Plan {
    pub files: Vec<PlannedFile>,
    /// Files with no entry in the environment mapping.
    pub unmapped: Vec<DiscoveredFile>,
    /// Configured repositories whose path does not exist.
    pub missing_repos: Vec<String>,
    pub failures: Vec<Failure>,
}

impl Plan {
    /// Whether every discovered file was planned without error.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Planned files belonging to one repository.
    pub fn files_for<'a>(&'a self, repository: &'a str) -> impl Iterator<Item = &'a PlannedFile> + 'a {
        self.files
            .iter()
            .filter(move |f| f.file.repository_name == repository)
    }
}

/// Plan every repository in the configuration.
///
/// # Errors
///
/// Only fails if the scan rules do not compile. Everything else is recorded
/// in [`Plan::failures`].
pub fn plan(config: &Config) -> Result<Plan> {
    let rules = config.scan_rules()?;
    let mut plan = Plan::default();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for repo in &config.repos {
        plan_repo(config, &rules, repo, &mut plan, &mut claimed);
    }

    debug!(
        planned = plan.files.len(),
        unmapped = plan.unmapped.len(),
        failures = plan.failures.len(),
        "plan complete"
    );
    Ok(plan)
}

fn plan_repo(
    config: &Config,
    rules: &ScanRules,
    repo: &Repo,
    plan: &mut Plan,
    claimed: &mut HashMap<PathBuf, PathBuf>,
) {
    if !repo.path.exists() {
        warn!(repo = %repo.name, path = %repo.path.display(), "repository path does not exist");
        plan.missing_repos.push(repo.name.clone());
        return;
    }

    let files = match scanner::scan_repo(repo, rules) {
        Ok(files) => files,
        Err(error) => {
            warn!(repo = %repo.name, error = %error, "repository scan failed");
            plan.failures.push(Failure {
                repository: repo.name.clone(),
                path: repo.path.clone(),
                error,
            });
            return;
        }
    };

    for file in files {
        let Some(environment) = config.environment_for(&file.file_name()) else {
            debug!(file = %file.relative_path.display(), "no environment mapping, skipping");
            plan.unmapped.push(file);
            continue;
        };
        let destination = config.destination(&repo.name, environment);

        if let Some(first) = claimed.get(&destination) {
            let error = PlanError::DestinationConflict {
                first: first.clone(),
                second: file.absolute_path.clone(),
                destination: destination.clone(),
            };
            warn!(error = %error, "destination already claimed");
            plan.failures.push(Failure {
                repository: repo.name.clone(),
                path: file.absolute_path,
                error: error.into(),
            });
            continue;
        }

        match env::load(&file.absolute_path) {
            Ok(mapping) => {
                claimed.insert(destination.clone(), file.absolute_path.clone());
                plan.files.push(PlannedFile {
                    environment: environment.to_string(),
                    destination,
                    mapping,
                    file,
                });
            }
            Err(error) => {
                warn!(file = %file.absolute_path.display(), error = %error, "cannot parse env file");
                plan.failures.push(Failure {
                    repository: repo.name.clone(),
                    path: file.absolute_path,
                    error,
                });
            }
        }
    }
}
