//! Scan command - list discovered env files.

use std::path::Path;
use std::process::ExitCode;

use crate::cli::{load_config, output};
use crate::core::rules::ScanRules;
use crate::core::scanner::{self, DiscoveredFile};
use crate::error::Result;

/// Scan one directory, or every configured repository when `dir` is `None`.
///
/// An ad-hoc directory scan uses the configured rules when a config exists and
/// the defaults otherwise.
pub fn execute(config_path: Option<&Path>, dir: Option<&Path>, json: bool) -> Result<ExitCode> {
    let files = match dir {
        Some(dir) => {
            let rules = match load_config(config_path) {
                Ok(config) => config.scan_rules()?,
                Err(e) if e.is_not_found() => ScanRules::default(),
                Err(e) => return Err(e),
            };
            scanner::scan(dir, &rules)?
        }
        None => {
            let config = load_config(config_path)?;
            let rules = config.scan_rules()?;
            let mut files = Vec::new();
            for repo in &config.repos {
                match scanner::scan_repo(repo, &rules) {
                    Ok(found) => files.extend(found),
                    Err(e) => output::warn(&format!("{}: {}", repo.name, e)),
                }
            }
            files
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(ExitCode::SUCCESS);
    }

    print_grouped(&files);
    Ok(ExitCode::SUCCESS)
}

fn print_grouped(files: &[DiscoveredFile]) {
    if files.is_empty() {
        output::dimmed("no env files found");
        return;
    }

    let mut current: Option<&str> = None;
    for file in files {
        if current != Some(file.repository_name.as_str()) {
            output::header(&file.repository_name);
            current = Some(file.repository_name.as_str());
        }
        output::list_item(&output::path(&file.relative_path.display().to_string()));
    }
}
