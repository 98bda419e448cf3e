//! envseal - Collect, normalize and diff .env files across repositories.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envseal::cli::output;
use envseal::cli::{execute, Cli};
use envseal::core::constants;
use envseal::error::{ConfigError, EnvError, Error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envseal=debug")
        } else {
            EnvFilter::new("envseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            let suggestion = match &e {
                Error::Config(ConfigError::NotFound(_)) => {
                    Some("create a config.toml or pass --config")
                }
                Error::Env(EnvError::Parse { .. }) => {
                    Some("fix the line above; nothing was written")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            ExitCode::FAILURE
        }
    }
}
