//! Key-level diff between two env mappings.
//!
//! Only key names are reported. Values are compared for equality and never
//! copied into the result, so a [`DiffResult`] is safe to print.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::env::{self, EnvMapping};
use crate::error::ParseError;

/// How one key changed between two mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    Modified,
}

impl Change {
    /// Single-character marker used in listings.
    pub fn marker(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Modified => '~',
        }
    }
}

/// Keys that differ between an old and a new mapping.
///
/// The three sets are disjoint. Keys present in both with equal values are
/// unchanged and appear in none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub modified: BTreeSet<String>,
}

impl DiffResult {
    /// No key was added, removed or modified.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Opposite of [`is_clean`](Self::is_clean).
    pub fn has_changes(&self) -> bool {
        !self.is_clean()
    }

    /// Total number of changed keys.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Whether no keys changed.
    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }

    /// Every changed key with its kind of change, sorted by key.
    pub fn changes(&self) -> Vec<(&str, Change)> {
        let mut all: Vec<(&str, Change)> = self
            .added
            .iter()
            .map(|k| (k.as_str(), Change::Added))
            .chain(self.removed.iter().map(|k| (k.as_str(), Change::Removed)))
            .chain(self.modified.iter().map(|k| (k.as_str(), Change::Modified)))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }
}

/// Renders as `+3 added, 1 removed, 2 modified`.
impl std::fmt::Display for DiffResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "+{} added, {} removed, {} modified",
            self.added.len(),
            self.removed.len(),
            self.modified.len()
        )
    }
}

/// Compare two mappings.
///
/// Values are compared as exact strings; both sides are expected to come out
/// of the codec so equivalent spellings have already been normalized away.
pub fn diff(old: &EnvMapping, new: &EnvMapping) -> DiffResult {
    let mut result = DiffResult::default();

    for (key, old_value) in old.iter() {
        match new.get(key) {
            None => {
                result.removed.insert(key.to_string());
            }
            Some(new_value) if new_value != old_value => {
                result.modified.insert(key.to_string());
            }
            Some(_) => {}
        }
    }

    for key in new.keys().filter(|k| !old.contains_key(k)) {
        result.added.insert(key.to_string());
    }

    result
}

/// Parse two `.env` texts and compare them.
///
/// # Errors
///
/// Returns the `ParseError` of whichever side is malformed first.
pub fn diff_text(old: &str, new: &str) -> Result<DiffResult, ParseError> {
    let old = env::parse(old)?;
    let new = env::parse(new)?;
    Ok(diff(&old, &new))
}
