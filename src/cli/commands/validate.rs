//! Validate command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use keyscan::{FieldPath, UniquenessValidator};

use super::{input_files, load_config};
use crate::error::CliError;
use crate::output::{OutputFormat, format_structured, format_validation};

/// Exit code reported when the identifier is not unique
const DUPLICATES_FOUND: u8 = 2;

/// Check that an identifier field is unique across every matching file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory containing the input files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Glob pattern selecting input files within the directory
    #[arg(short, long, default_value = "*.json")]
    pub pattern: String,

    /// Identifier field path [default: Identifier.UPI]
    #[arg(long)]
    pub field: Option<String>,

    /// Identifier-bearing records scanned per file (0 = all) [default: 1000]
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Handle the validate command
///
/// Exits with code 2 when a duplicate identifier is found.
pub fn handle_validate(args: ValidateArgs) -> Result<ExitCode, CliError> {
    let mut config = load_config(args.config.as_deref())?.validation;
    if let Some(field) = &args.field {
        config.identifier = FieldPath::parse(field)?;
    }
    if let Some(max) = args.max_records {
        config.max_records_per_file = max;
    }

    let files = input_files(&args.dir, &args.pattern)?;
    if files.is_empty() && args.format == OutputFormat::Text {
        println!("No input files found.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut validator = UniquenessValidator::with_config(config);
    validator.scan_files(&files);
    let report = validator.finish();

    match args.format {
        OutputFormat::Text => print!("{}", format_validation(&report)),
        format => println!("{}", format_structured(&report, format)?),
    }

    if report.is_unique {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(DUPLICATES_FOUND))
    }
}
