//! Repository scanner.
//!
//! Walks a repository depth-first and collects every file accepted by the
//! [`ScanRules`]. Siblings are visited in file-name order so results are
//! stable between runs.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::config::Repo;
use crate::core::rules::ScanRules;
use crate::error::{Result, ScanError};

/// An environment file found inside a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    /// Absolute path on disk.
    pub absolute_path: PathBuf,
    /// Path relative to the repository root.
    pub relative_path: PathBuf,
    /// Name of the repository the file belongs to.
    pub repository_name: String,
}

impl DiscoveredFile {
    /// The file's base name (e.g. `.env.prod`).
    pub fn file_name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Scan a repository, naming it after its root directory.
///
/// # Errors
///
/// Returns `ScanError::Access` if the root exists but cannot be read.
pub fn scan(root: &Path, rules: &ScanRules) -> Result<Vec<DiscoveredFile>> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    scan_named(root, &name, rules)
}

/// Scan a configured repository.
///
/// # Errors
///
/// Returns `ScanError::Access` if the repository root cannot be read.
pub fn scan_repo(repo: &Repo, rules: &ScanRules) -> Result<Vec<DiscoveredFile>> {
    scan_named(&repo.path, &repo.name, rules)
}

fn scan_named(root: &Path, repository_name: &str, rules: &ScanRules) -> Result<Vec<DiscoveredFile>> {
    if !root.is_dir() {
        debug!(root = %root.display(), "repository root missing, nothing to scan");
        return Ok(Vec::new());
    }

    let access = |source| ScanError::Access {
        path: root.to_path_buf(),
        source,
    };
    std::fs::read_dir(root).map_err(access)?;
    let base = root.canonicalize().map_err(access)?;

    debug!(root = %base.display(), repo = repository_name, "scanning repository");

    let walker = WalkDir::new(&base)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let pruned = entry.depth() > 0
                && entry.file_type().is_dir()
                && rules.is_ignored_dir(&entry.file_name().to_string_lossy());
            if pruned {
                debug!(dir = %entry.path().display(), "pruning ignored directory");
            }
            !pruned
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!(path = %path, error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.path_is_symlink() {
            debug!(path = %entry.path().display(), "skipping symlink");
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };

        if rules.matches(relative) {
            debug!(file = %relative.display(), "discovered env file");
            files.push(DiscoveredFile {
                absolute_path: entry.path().to_path_buf(),
                relative_path: relative.to_path_buf(),
                repository_name: repository_name.to_string(),
            });
        }
    }

    debug!(repo = repository_name, count = files.len(), "scan complete");
    Ok(files)
}
