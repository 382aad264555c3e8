//! CLI subcommand implementations

mod analyze;
mod validate;

pub use analyze::{AnalyzeArgs, handle_analyze};
pub use validate::{ValidateArgs, handle_validate};

use std::path::{Path, PathBuf};

use keyscan::{KeyscanConfig, discover_files};

use crate::error::CliError;

/// Load the configuration file, or the defaults when none is given
fn load_config(path: Option<&Path>) -> Result<KeyscanConfig, CliError> {
    match path {
        Some(path) => Ok(KeyscanConfig::load(path)?),
        None => Ok(KeyscanConfig::default()),
    }
}

/// List the input files of a run
fn input_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    let files = discover_files(dir, pattern)?;
    tracing::info!(count = files.len(), pattern, "Discovered input files");
    Ok(files)
}
