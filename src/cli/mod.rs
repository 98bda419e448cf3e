//! Command-line interface.

pub mod completions;
pub mod diff;
pub mod normalize;
pub mod output;
pub mod scan;
pub mod status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::config::Config;
use crate::error::Result;

/// envseal - Collect, normalize and diff .env files across repositories.
#[derive(Parser)]
#[command(
    name = "envseal",
    about = "Collect, normalize and diff .env files across repositories",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, env = "ENVSEAL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List env files in the configured repositories, or in one directory
    Scan {
        /// Scan this directory instead of the configured repositories
        path: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical form of an env file
    Normalize {
        /// Env file to normalize
        file: PathBuf,
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which keys changed between two env files (values are never shown)
    Diff {
        /// Previous version (a missing file counts as empty)
        old: PathBuf,
        /// New version
        new: PathBuf,
        /// Exit with status 1 when there are changes
        #[arg(long)]
        exit_code: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what would be sealed into the vault
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let config = cli.config;

    match cli.command {
        Command::Scan { path, json } => scan::execute(config.as_deref(), path.as_deref(), json),
        Command::Normalize { file, output } => normalize::execute(&file, output.as_deref()),
        Command::Diff {
            old,
            new,
            exit_code,
            json,
        } => diff::execute(&old, &new, exit_code, json),
        Command::Status => status::execute(config.as_deref()),
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Load the config from `--config`, `$ENVSEAL_CONFIG`, or the default location.
pub(crate) fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    let path = Config::resolve_path(explicit)?;
    Config::load(path)
}
