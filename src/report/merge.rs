//! Aggregation of per-sample reports into `all_samples_summary.<ext>`.
//!
//! An aggregate is only written when at least two per-sample reports exist.
//! Text reports are concatenated with a `Sample:` heading and a blank-line
//! separator; tabular reports share one header that is the union of every
//! report's columns; JSON reports become an array.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::report::{ReportError, ReportFormat};

/// Fewest per-sample reports worth aggregating
pub const MIN_REPORTS_TO_MERGE: usize = 2;

/// Result of a merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Aggregate written to `path` from `count` sample reports
    Merged { path: PathBuf, count: usize },
    /// Too few sample reports; nothing written
    Skipped { found: usize },
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged { path, count } => write!(
                f,
                "All {count} sample summaries have been concatenated into {}",
                path.display()
            ),
            Self::Skipped { found } => write!(
                f,
                "Found {found} summary file(s), fewer than {MIN_REPORTS_TO_MERGE}. No concatenation needed."
            ),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError + '_ {
    move |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Per-sample reports in `dir` for `format`, as (sample, path), sorted by file name
///
/// # Errors
///
/// Returns `ReportError::Io` if the directory cannot be listed.
pub fn find_sample_reports(
    dir: &Path,
    format: ReportFormat,
) -> Result<Vec<(String, PathBuf)>, ReportError> {
    let mut reports = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(sample) = format.sample_of_summary(file_name) {
            reports.push((sample.to_string(), path.clone()));
        }
    }

    reports.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(reports)
}

/// Merge the per-sample reports in `dir` into one aggregate report.
///
/// The aggregate itself is never treated as an input, so re-running a merge
/// replaces it rather than nesting it.
///
/// # Errors
///
/// Returns a `ReportError` if the directory cannot be listed or any report
/// cannot be read or the aggregate cannot be written.
pub fn merge_reports(dir: &Path, format: ReportFormat) -> Result<MergeOutcome, ReportError> {
    let reports = find_sample_reports(dir, format)?;

    if reports.len() < MIN_REPORTS_TO_MERGE {
        info!(found = reports.len(), "Too few sample reports to merge");
        return Ok(MergeOutcome::Skipped {
            found: reports.len(),
        });
    }

    let output = dir.join(format.aggregate_file_name());
    match format {
        ReportFormat::Text => merge_text(&reports, &output)?,
        ReportFormat::Csv | ReportFormat::Tsv => {
            merge_tabular(&reports, &output, format.delimiter().unwrap_or(b','))?;
        }
        ReportFormat::Json => merge_json(&reports, &output)?,
    }

    info!(
        count = reports.len(),
        path = %output.display(),
        "Merged sample reports"
    );
    Ok(MergeOutcome::Merged {
        path: output,
        count: reports.len(),
    })
}

fn merge_text(reports: &[(String, PathBuf)], output: &Path) -> Result<(), ReportError> {
    let mut writer = File::create(output)
        .map(BufWriter::new)
        .map_err(io_error(output))?;

    for (sample, path) in reports {
        let content = std::fs::read_to_string(path).map_err(io_error(path))?;
        write!(writer, "Sample: {sample}\n\n{content}\n\n\n").map_err(io_error(output))?;
    }

    writer.flush().map_err(io_error(output))
}

fn merge_tabular(
    reports: &[(String, PathBuf)],
    output: &Path,
    delimiter: u8,
) -> Result<(), ReportError> {
    let mut columns: Vec<String> = Vec::new();
    let mut tables = Vec::with_capacity(reports.len());

    for (_, path) in reports {
        let csv_error = |source| ReportError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)
            .map_err(csv_error)?;

        let headers = reader.headers().map_err(csv_error)?.clone();
        for header in &headers {
            if !columns.iter().any(|c| c == header) {
                columns.push(header.to_string());
            }
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;
        debug!(path = %path.display(), rows = rows.len(), "Read sample report");
        tables.push((headers, rows));
    }

    let csv_error = |source| ReportError::Csv {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(output)
        .map_err(csv_error)?;

    writer.write_record(&columns).map_err(csv_error)?;
    for (headers, rows) in &tables {
        for row in rows {
            let cells = columns.iter().map(|column| {
                headers
                    .iter()
                    .position(|h| h == column)
                    .and_then(|i| row.get(i))
                    .unwrap_or("")
            });
            writer.write_record(cells).map_err(csv_error)?;
        }
    }

    writer.flush().map_err(io_error(output))
}

fn merge_json(reports: &[(String, PathBuf)], output: &Path) -> Result<(), ReportError> {
    let mut values = Vec::with_capacity(reports.len());

    for (_, path) in reports {
        let reader = File::open(path)
            .map(BufReader::new)
            .map_err(io_error(path))?;
        let value: serde_json::Value =
            serde_json::from_reader(reader).map_err(|source| ReportError::Json {
                path: path.clone(),
                source,
            })?;
        values.push(value);
    }

    let mut writer = File::create(output)
        .map(BufWriter::new)
        .map_err(io_error(output))?;
    serde_json::to_writer_pretty(&mut writer, &values).map_err(|source| ReportError::Json {
        path: output.to_path_buf(),
        source,
    })?;
    writeln!(writer).map_err(io_error(output))?;
    writer.flush().map_err(io_error(output))
}
