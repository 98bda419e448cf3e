//! Error types for envseal.
//!
//! Each concern has its own error enum; all of them fold into [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("duplicate repository name: {0}")]
    DuplicateRepo(String),
}

/// Repository traversal errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// A malformed line in environment-file text.
///
/// Carries the 1-based line number and the variable name of the offending
/// entry, with its value redacted, so the source file can be fixed by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}: {content}")]
pub struct ParseError {
    pub line: usize,
    pub content: String,
    pub reason: ParseReason,
}

/// Why a line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    MissingEquals,
    InvalidKey,
    UnterminatedQuote,
    TrailingCharacters,
}

impl std::fmt::Display for ParseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::MissingEquals => "expected KEY=VALUE",
            Self::InvalidKey => "invalid variable name",
            Self::UnterminatedQuote => "unterminated quoted value",
            Self::TrailingCharacters => "unexpected characters after closing quote",
        };
        f.write_str(msg)
    }
}

/// Environment-file read and write errors.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed env file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("variable name cannot be empty")]
    EmptyKey,

    #[error("invalid variable name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid environment name '{name}': {reason}")]
    InvalidEnvironment { name: String, reason: String },

    #[error("invalid repository name '{name}': {reason}")]
    InvalidRepoName { name: String, reason: String },
}

/// Errors raised while building a push plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{} and {} both map to {}", first.display(), second.display(), destination.display())]
    DestinationConflict {
        first: PathBuf,
        second: PathBuf,
        destination: PathBuf,
    },
}

impl Error {
    /// Whether this error means "nothing there" rather than a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Env(EnvError::NotFound(_)) | Error::Config(ConfigError::NotFound(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
