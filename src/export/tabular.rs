//! CSV writers for analysis reports

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::ExportError;
use crate::analysis::AnalysisReport;

/// Default file name of the candidates table
pub const CANDIDATES_FILE: &str = "primary_key_candidates.csv";

/// Default file name of the structure summary table
pub const STRUCTURE_FILE: &str = "data_structure_summary.csv";

const LIST_SEPARATOR: &str = ", ";

#[derive(Serialize)]
struct CandidateRow<'a> {
    file: &'a str,
    field: &'a str,
    uniqueness_ratio: f64,
    coverage: f64,
    unique_values: usize,
    total_values: usize,
}

fn source_of(report: &AnalysisReport) -> &str {
    report.source.as_deref().unwrap_or("")
}

/// Write one row per candidate of every report
///
/// Returns the number of rows written.
pub fn write_candidates<W: Write>(
    writer: W,
    reports: &[AnalysisReport],
) -> Result<usize, ExportError> {
    // The header is written explicitly so that an empty table still has one
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record([
        "file",
        "field",
        "uniqueness_ratio",
        "coverage",
        "unique_values",
        "total_values",
    ])?;

    let mut rows = 0;
    for report in reports {
        for candidate in &report.candidates {
            let stats = &candidate.statistics;
            csv_writer.serialize(CandidateRow {
                file: source_of(report),
                field: stats.path.as_str(),
                uniqueness_ratio: stats.uniqueness_ratio,
                coverage: stats.coverage,
                unique_values: stats.unique_count,
                total_values: stats.total_count,
            })?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Write one structure summary row per report
///
/// Facet columns follow the order in which facet names first appear across
/// the reports. Returns the number of rows written.
pub fn write_structure_summary<W: Write>(
    writer: W,
    reports: &[AnalysisReport],
) -> Result<usize, ExportError> {
    let mut facet_names: Vec<&str> = Vec::new();
    for report in reports {
        for facet in &report.structure.facets {
            if !facet_names.contains(&facet.name.as_str()) {
                facet_names.push(&facet.name);
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec!["file", "records_analyzed", "top_level_fields"];
    header.extend(facet_names.iter().copied());
    csv_writer.write_record(&header)?;

    for report in reports {
        let mut row = vec![
            source_of(report).to_string(),
            report.record_count.to_string(),
            report.structure.top_level_names().join(LIST_SEPARATOR),
        ];
        for name in &facet_names {
            let joined = report
                .structure
                .facet(name)
                .map(|facet| facet.value_names().join(LIST_SEPARATOR))
                .unwrap_or_default();
            row.push(joined);
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(reports.len())
}

/// Write the candidates table to `path`
pub fn write_candidates_file(path: &Path, reports: &[AnalysisReport]) -> Result<usize, ExportError> {
    write_candidates(File::create(path)?, reports)
}

/// Write the structure summary table to `path`
pub fn write_structure_summary_file(
    path: &Path,
    reports: &[AnalysisReport],
) -> Result<usize, ExportError> {
    write_structure_summary(File::create(path)?, reports)
}
