//! Constants used throughout envseal.
//!
//! Centralizes default scan rules, file names and environment variables.

/// Configuration file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application directory name under the platform config dir.
pub const APP_DIR: &str = "envseal";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ENVSEAL_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ENVSEAL_LOG";

/// Directory inside the vault holding per-repository secrets.
pub const VAULT_SECRETS_DIR: &str = "secrets";

/// Extension given to files in the vault.
pub const VAULT_FILE_EXT: &str = "env";

/// Patterns a file name must match to be picked up.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &[".env", ".env.*"];

/// Patterns that are never picked up, even when included.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".env.example"];

/// Directories pruned during traversal (version control and dependency trees).
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    "vendor",
];

/// Default file name to environment name table.
pub const DEFAULT_ENV_MAPPING: &[(&str, &str)] = &[
    (".env", "local"),
    (".env.dev", "dev"),
    (".env.staging", "staging"),
    (".env.prod", "prod"),
];
