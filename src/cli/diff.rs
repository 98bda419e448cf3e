//! Diff command - show which keys changed between two env files.

use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::output;
use crate::core::diff;
use crate::core::env::{self, EnvMapping};
use crate::error::Result;

/// Compare `old` against `new`, printing key names only.
pub fn execute(old: &Path, new: &Path, exit_code: bool, json: bool) -> Result<ExitCode> {
    let old_mapping = match env::load(old) {
        Ok(mapping) => mapping,
        Err(e) if e.is_not_found() => {
            debug!(path = %old.display(), "old file missing, comparing against empty");
            EnvMapping::new()
        }
        Err(e) => return Err(e),
    };
    let new_mapping = env::load(new)?;

    let result = diff::diff(&old_mapping, &new_mapping);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_clean() {
        output::success("no changes");
    } else {
        for (key, change) in result.changes() {
            output::change(key, change);
        }
        output::dimmed(&result.to_string());
    }

    if exit_code && result.has_changes() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
