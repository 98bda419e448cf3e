//! Scan rules.
//!
//! Decides which files inside a repository count as environment files and
//! which directories are never entered.

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path};

use crate::core::constants;
use crate::error::{Result, ScanError};

/// The `[scan]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// A file is a candidate if it matches any of these.
    #[serde(default = "default_include")]
    pub include_patterns: Vec<String>,
    /// A candidate is dropped if it matches any of these.
    #[serde(default = "default_exclude")]
    pub exclude_patterns: Vec<String>,
    /// Directory names pruned at any depth.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

fn default_include() -> Vec<String> {
    to_owned(constants::DEFAULT_INCLUDE_PATTERNS)
}

fn default_exclude() -> Vec<String> {
    to_owned(constants::DEFAULT_EXCLUDE_PATTERNS)
}

fn default_ignore_dirs() -> Vec<String> {
    to_owned(constants::DEFAULT_IGNORE_DIRS)
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_patterns: default_include(),
            exclude_patterns: default_exclude(),
            ignore_dirs: default_ignore_dirs(),
        }
    }
}

/// A compiled glob.
///
/// Patterns without a `/` are matched against the file name only; patterns
/// with one are matched against the whole relative path.
#[derive(Debug, Clone)]
struct Glob {
    raw: String,
    pattern: Pattern,
    path_scoped: bool,
}

impl Glob {
    fn new(raw: &str) -> Result<Self> {
        let pattern = Pattern::new(raw).map_err(|source| ScanError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;

        Ok(Self {
            raw: raw.to_string(),
            pattern,
            path_scoped: raw.contains('/'),
        })
    }

    fn matches(&self, relative: &str, name: &str) -> bool {
        if self.path_scoped {
            let options = MatchOptions {
                require_literal_separator: true,
                ..MatchOptions::new()
            };
            self.pattern.matches_with(relative, options)
        } else {
            self.pattern.matches(name)
        }
    }
}

/// Compiled include/exclude rules for one scan.
///
/// Exclusion always wins over inclusion.
#[derive(Debug, Clone)]
pub struct ScanRules {
    include: Vec<Glob>,
    exclude: Vec<Glob>,
    ignore_dirs: BTreeSet<String>,
}

impl ScanRules {
    /// Compile rules from raw patterns.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` for the first pattern that is not a valid glob.
    pub fn new<I, E, D>(include: I, exclude: E, ignore_dirs: D) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let include = include
            .into_iter()
            .map(|p| Glob::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let exclude = exclude
            .into_iter()
            .map(|p| Glob::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include,
            exclude,
            ignore_dirs: ignore_dirs.into_iter().map(Into::into).collect(),
        })
    }

    /// Compile rules from the `[scan]` config section.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` if any pattern fails to compile.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(
            &config.include_patterns,
            &config.exclude_patterns,
            config.ignore_dirs.iter().cloned(),
        )
    }

    /// Whether a file at `relative` (to the repository root) qualifies.
    pub fn matches(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        let relative = slash_path(relative);

        self.include.iter().any(|g| g.matches(&relative, &name))
            && !self.exclude.iter().any(|g| g.matches(&relative, &name))
    }

    /// Whether a directory with this name is pruned.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    /// Include patterns as written.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(|g| g.raw.as_str())
    }

    /// Exclude patterns as written.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(|g| g.raw.as_str())
    }

    /// Pruned directory names.
    pub fn ignore_dirs(&self) -> impl Iterator<Item = &str> {
        self.ignore_dirs.iter().map(String::as_str)
    }
}

impl Default for ScanRules {
    fn default() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Glob> {
            patterns.iter().filter_map(|p| Glob::new(p).ok()).collect()
        };

        Self {
            include: compile(constants::DEFAULT_INCLUDE_PATTERNS),
            exclude: compile(constants::DEFAULT_EXCLUDE_PATTERNS),
            ignore_dirs: default_ignore_dirs().into_iter().collect(),
        }
    }
}

/// Render a relative path with `/` separators regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
