//! Normalize command - print or write the canonical form of an env file.

use std::path::Path;
use std::process::ExitCode;

use crate::cli::output;
use crate::core::env;
use crate::error::Result;

/// Normalize `file` to stdout, or atomically to `out`.
pub fn execute(file: &Path, out: Option<&Path>) -> Result<ExitCode> {
    let mapping = env::load(file)?;

    match out {
        Some(out) => {
            env::write(out, &mapping)?;
            output::success(&format!(
                "wrote {} keys to {}",
                mapping.len(),
                output::path(&out.display().to_string())
            ));
        }
        None => print!("{}", env::serialize(&mapping)),
    }

    Ok(ExitCode::SUCCESS)
}
