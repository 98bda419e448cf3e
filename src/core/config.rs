//! Configuration file management.
//!
//! Handles reading, writing, and validating the envseal `config.toml`.
//!
//! ```toml
//! vault_path = "/home/me/secrets-vault"
//!
//! [[repos]]
//! name = "billing-api"
//! path = "/home/me/src/billing-api"
//!
//! [env_mapping]
//! ".env" = "local"
//! ".env.prod" = "prod"
//!
//! [scan]
//! include_patterns = [".env", ".env.*"]
//! exclude_patterns = [".env.example"]
//! ignore_dirs = [".git", "node_modules"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::rules::{ScanConfig, ScanRules};
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// A source repository to collect env files from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Name used as the repository's directory inside the vault.
    pub name: String,
    /// Local checkout path.
    pub path: PathBuf,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the vault repository.
    pub vault_path: PathBuf,
    /// Repositories to scan.
    #[serde(default)]
    pub repos: Vec<Repo>,
    /// File name to logical environment name (e.g. `.env.prod` → `prod`).
    #[serde(default = "default_env_mapping")]
    pub env_mapping: BTreeMap<String, String>,
    /// Scan rules.
    #[serde(default)]
    pub scan: ScanConfig,
}

fn default_env_mapping() -> BTreeMap<String, String> {
    constants::DEFAULT_ENV_MAPPING
        .iter()
        .map(|(file, env)| (file.to_string(), env.to_string()))
        .collect()
}

impl Config {
    /// Create a configuration with defaults and no repositories.
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            repos: Vec::new(),
            env_mapping: default_env_mapping(),
            scan: ScanConfig::default(),
        }
    }

    /// Default config location: `$ENVSEAL_CONFIG`, else `<config dir>/envseal/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no config directory.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(constants::CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join(constants::APP_DIR).join(constants::CONFIG_FILE))
            .ok_or_else(|| ConfigError::NoConfigDir.into())
    }

    /// Use `explicit` if given, otherwise [`default_path`](Self::default_path).
    ///
    /// # Errors
    ///
    /// Same as [`default_path`](Self::default_path).
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::from_toml(&contents)?;

        debug!(
            repos = config.repos.len(),
            environments = config.env_mapping.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or a validation error.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - Repository names are usable as vault directories and unique
    /// - Environment names are usable as vault file names
    /// - Scan patterns compile
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.vault_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "vault_path",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        let mut seen = BTreeSet::new();
        for repo in &self.repos {
            validation::validate_repo_name(&repo.name)?;
            if !seen.insert(repo.name.as_str()) {
                return Err(ConfigError::DuplicateRepo(repo.name.clone()).into());
            }
        }

        for environment in self.env_mapping.values() {
            validation::validate_environment(environment)?;
        }

        self.scan_rules()?;
        Ok(())
    }

    /// Compile the scan rules.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` if a pattern does not compile.
    pub fn scan_rules(&self) -> Result<ScanRules> {
        ScanRules::from_config(&self.scan)
    }

    /// Logical environment name for a file name, if mapped.
    pub fn environment_for(&self, file_name: &str) -> Option<&str> {
        self.env_mapping.get(file_name).map(String::as_str)
    }

    /// Where a repository's environment lives in the vault:
    /// `<vault>/secrets/<repo>/<environment>.env`.
    pub fn destination(&self, repo_name: &str, environment: &str) -> PathBuf {
        self.vault_path
            .join(constants::VAULT_SECRETS_DIR)
            .join(repo_name)
            .join(format!("{}.{}", environment, constants::VAULT_FILE_EXT))
    }
}
