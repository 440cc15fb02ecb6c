//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::BuildOutput;
use crate::utils::path::resolve_path;

/// Resolve a command-line path against the working directory.
pub fn resolve_cli_path(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    Ok(resolve_path(path, &cwd))
}

/// Assemble the bundler's build event from `--entry` and `--code`.
///
/// Without `--code` the entry file itself holds the finalized code.
pub fn load_build_output(entry: &Path, code: Option<&Path>) -> Result<BuildOutput> {
    let finalized_file_path = resolve_cli_path(entry)?;

    let finalized_code = match code {
        Some(path) if path.as_os_str() == "-" => read_code_from_stdin()?,
        Some(path) => read_code(&resolve_cli_path(path)?)?,
        None => read_code(&finalized_file_path)?,
    };

    Ok(BuildOutput {
        finalized_file_path,
        finalized_code,
    })
}

fn read_code(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read finalized code from `{}`", path.display()))
}

fn read_code_from_stdin() -> Result<String> {
    let mut code = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut code)
        .context("failed to read finalized code from stdin")?;
    Ok(code)
}
