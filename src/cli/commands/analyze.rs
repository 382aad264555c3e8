//! Analyze command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use keyscan::PrimaryKeyDetector;
use keyscan::export::{
    CANDIDATES_FILE, STRUCTURE_FILE, write_candidates_file, write_structure_summary_file,
};

use super::{input_files, load_config};
use crate::error::CliError;
use crate::output::{OutputFormat, format_batch, format_structured};

/// Detect primary key candidates in every matching file
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory containing the input files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Glob pattern selecting input files within the directory
    #[arg(short, long, default_value = "*.json")]
    pub pattern: String,

    /// Records analyzed per file (0 = all) [default: 500]
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Where the CSV reports are written [default: DIR]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing CSV reports
    #[arg(long)]
    pub no_csv: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Handle the analyze command
pub fn handle_analyze(args: AnalyzeArgs) -> Result<ExitCode, CliError> {
    let mut config = load_config(args.config.as_deref())?.analysis;
    if let Some(max) = args.max_records {
        config.max_records = max;
    }

    let files = input_files(&args.dir, &args.pattern)?;
    let detector = PrimaryKeyDetector::with_config(config);
    let batch = detector.analyze_files(&files);

    let mut written = Vec::new();
    if !args.no_csv && !batch.reports.is_empty() {
        let output_dir = args.output_dir.unwrap_or(args.dir);
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| CliError::OutputDirectory(output_dir.clone(), e))?;

        let candidates = output_dir.join(CANDIDATES_FILE);
        let rows = write_candidates_file(&candidates, &batch.reports)?;
        tracing::info!(path = %candidates.display(), rows, "Wrote candidates");
        written.push(candidates);

        let structure = output_dir.join(STRUCTURE_FILE);
        write_structure_summary_file(&structure, &batch.reports)?;
        tracing::info!(path = %structure.display(), "Wrote structure summary");
        written.push(structure);
    }

    match args.format {
        OutputFormat::Text => print!("{}", format_batch(&batch, &written)),
        format => println!("{}", format_structured(&batch, format)?),
    }

    Ok(ExitCode::SUCCESS)
}
