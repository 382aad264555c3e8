//! Output formatting for CLI

use std::path::PathBuf;

use clap::ValueEnum;
use keyscan::{BatchReport, ValidationReport};
use serde::Serialize;

use crate::error::CliError;

/// Candidates listed per file in text mode
const TOP_CANDIDATES: usize = 5;

/// Duplicate entries listed in text mode
const SHOWN_DUPLICATES: usize = 5;

const RULE_WIDTH: usize = 50;

/// Report rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as JSON
    Json,
    /// Full report as YAML
    Yaml,
}

/// Render `report` as JSON or YAML
///
/// Text mode has no generic rendering; callers use the report-specific
/// formatters below.
pub fn format_structured<T: Serialize>(
    report: &T,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Text => Err(CliError::InvalidArgument(
            "text output has no structured form".to_string(),
        )),
    }
}

fn heading(output: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    output.push_str(&format!("\n{rule}\n{title}\n{rule}\n"));
}

/// Format a batch of analysis reports for the terminal
pub fn format_batch(batch: &BatchReport, written: &[PathBuf]) -> String {
    let mut output = String::new();

    if batch.is_empty() {
        output.push_str("No input files found.\n");
        return output;
    }

    heading(&mut output, "PRIMARY KEY DETECTION SUMMARY");

    for report in &batch.reports {
        let source = report.source.as_deref().unwrap_or("<input>");
        output.push_str(&format!("\n{}:\n", source));
        output.push_str(&format!("  Records analyzed: {}\n", report.record_count));
        if report.skipped_lines > 0 {
            output.push_str(&format!("  Skipped lines: {}\n", report.skipped_lines));
        }

        let fields = report.structure.top_level_names();
        if !fields.is_empty() {
            output.push_str(&format!("  Top-level fields: {}\n", fields.join(", ")));
        }

        if report.candidates.is_empty() {
            output.push_str("  No strong primary key candidates found\n");
        } else {
            output.push_str(&format!(
                "  Primary Key Candidates ({}):\n",
                report.candidates.len()
            ));
            for candidate in report.candidates.iter().take(TOP_CANDIDATES) {
                let stats = &candidate.statistics;
                output.push_str(&format!("    {}. {}\n", candidate.rank, stats.path));
                output.push_str(&format!(
                    "       Uniqueness: {:.3}\n",
                    stats.uniqueness_ratio
                ));
                output.push_str(&format!("       Coverage: {:.3}\n", stats.coverage));
                output.push_str(&format!(
                    "       Values: {}/{}\n",
                    stats.unique_count, stats.total_count
                ));
            }
        }

        for facet in &report.structure.facets {
            if !facet.values.is_empty() {
                output.push_str(&format!(
                    "  {}: {}\n",
                    facet.name,
                    facet.value_names().join(", ")
                ));
            }
        }
    }

    if !batch.failures.is_empty() {
        output.push_str("\n⚠️  Skipped files:\n");
        for failure in &batch.failures {
            output.push_str(&format!(
                "  - {}: {}\n",
                failure.path.display(),
                failure.error
            ));
        }
    }

    if !written.is_empty() {
        output.push_str("\nReports written:\n");
        for path in written {
            output.push_str(&format!("  - {}\n", path.display()));
        }
    }

    output.push_str(&format!(
        "\n✅ Analyzed {} file(s)\n",
        batch.reports.len()
    ));
    output
}

/// Format a validation report for the terminal
pub fn format_validation(report: &ValidationReport) -> String {
    let mut output = String::new();
    let field = &report.identifier;

    heading(&mut output, "VALIDATION RESULTS");
    output.push_str(&format!(
        "Total unique {} values across all files: {}\n",
        field, report.total_unique
    ));
    output.push_str(&format!(
        "Total files processed: {}\n",
        report.files_processed()
    ));

    if !report.files.is_empty() {
        output.push_str(&format!("\n{} values per file:\n", field));
        for scan in &report.files {
            output.push_str(&format!(
                "  {}: {} distinct in {} record(s)",
                scan.file, scan.distinct_identifiers, scan.records_scanned
            ));
            if scan.unresolved > 0 {
                output.push_str(&format!(", {} without identifier", scan.unresolved));
            }
            if scan.skipped_lines > 0 {
                output.push_str(&format!(", {} undecodable line(s)", scan.skipped_lines));
            }
            output.push('\n');
        }
    }

    if !report.failures.is_empty() {
        output.push_str("\n⚠️  Skipped files:\n");
        for failure in &report.failures {
            output.push_str(&format!(
                "  - {}: {}\n",
                failure.path.display(),
                failure.error
            ));
        }
    }

    output.push_str(&format!(
        "\nDuplicate values found: {}\n",
        report.duplicate_count()
    ));
    if report.duplicates.is_empty() {
        output.push_str(&format!(
            "✅ No duplicates found - {} is a valid unique identifier!\n",
            field
        ));
    } else {
        output.push_str("Duplicate details:\n");
        for entry in report.duplicates.iter().take(SHOWN_DUPLICATES) {
            let locations: Vec<String> =
                entry.locations.iter().map(|l| l.to_string()).collect();
            output.push_str(&format!(
                "  {}: found in {}\n",
                entry.value,
                locations.join(", ")
            ));
        }
        if report.duplicates.len() > SHOWN_DUPLICATES {
            output.push_str(&format!(
                "  ... and {} more\n",
                report.duplicates.len() - SHOWN_DUPLICATES
            ));
        }
    }

    if !report.examples.is_empty() {
        output.push_str("\nExamples:\n");
        for example in &report.examples {
            let facets: Vec<&str> = example.facets.iter().map(|(_, v)| v.as_str()).collect();
            output.push_str(&format!(
                "  {} - {} ({})\n",
                example.value,
                facets.join(" "),
                example.file
            ));
        }
    }

    if let Some(format) = &report.format {
        output.push_str("\nFormat Analysis:\n");
        output.push_str(&format!("  Sample value: {}\n", format.sample_value));
        output.push_str(&format!(
            "  Length: {} characters\n",
            format.sample_value.chars().count()
        ));
        output.push_str(&format!("  Character set: {}\n", format.character_set));
        output.push_str(&format!(
            "  Length consistency: {} unique length(s): {:?}\n",
            format.lengths.len(),
            format.lengths
        ));
        if format.consistent_length {
            output.push_str("  ✅ All values have consistent length\n");
        } else {
            output.push_str("  ⚠️  Values have varying lengths\n");
        }
    }

    heading(&mut output, "CONCLUSION");
    if report.is_unique {
        output.push_str(&format!("✅ {} is confirmed as a valid PRIMARY KEY\n", field));
        output.push_str("   - No duplicates found across all files\n");
    } else {
        output.push_str(&format!("❌ {} has issues as a primary key\n", field));
        output.push_str(&format!(
            "   - {} duplicate values found\n",
            report.duplicate_count()
        ));
    }
    output.push_str(&format!(
        "\nSummary: {} unique values across {} files\n",
        report.total_unique,
        report.files_processed()
    ));

    output
}
