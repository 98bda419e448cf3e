//! Input validation for envseal.
//!
//! Validates variable names and environment names.

use crate::error::{Result, ValidationError};

/// Whether `key` is a valid variable name (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Validate a variable name.
///
/// Variable names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if key.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Why `name` cannot be used as a single path segment inside the vault.
fn segment_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("cannot be empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("cannot contain path separators")
    } else if name == "." || name == ".." {
        Some("cannot be a relative directory reference")
    } else {
        None
    }
}

/// Validate a logical environment name (e.g. `local`, `prod`).
///
/// The name becomes a file name inside the vault, so it must be non-empty
/// and free of path separators and parent references.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEnvironment` if the name is unusable.
pub fn validate_environment(name: &str) -> Result<()> {
    match segment_problem(name) {
        Some(reason) => Err(ValidationError::InvalidEnvironment {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Validate a repository name. Same rules as environment names, since it
/// becomes a directory inside the vault.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRepoName` if the name is unusable.
pub fn validate_repo_name(name: &str) -> Result<()> {
    match segment_problem(name) {
        Some(reason) => Err(ValidationError::InvalidRepoName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
