//! Per-sample coverage reports and their aggregation.
//!
//! - [`record`]: report records built from counts and coverage
//! - [`writer`]: writes one `{sample}_summary.<ext>` per sample and echoes
//!   each record to a progress stream
//! - [`merge`]: concatenates per-sample reports into `all_samples_summary.<ext>`
//!
//! ## Formats
//!
//! | Format | Extension | Per-sample content |
//! |--------|-----------|--------------------|
//! | text   | `txt`     | `Key: value` lines |
//! | csv    | `csv`     | header and one row |
//! | tsv    | `tsv`     | header and one row, tab-delimited |
//! | json   | `json`    | one object |

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::validation::{ValidationError, RESERVED_SAMPLE_NAME};

pub mod merge;
pub mod record;
pub mod writer;

/// Suffix shared by every per-sample report file name, before the extension
pub const SUMMARY_SUFFIX: &str = "_summary";

/// Stem of the aggregate report file name
pub const AGGREGATE_STEM: &str = RESERVED_SAMPLE_NAME;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
    Tsv,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    /// Field delimiter for tabular formats
    #[must_use]
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Text | Self::Json => None,
        }
    }

    /// File name of the report for one sample, e.g. `sampleA_summary.csv`
    #[must_use]
    pub fn summary_file_name(self, sample: &str) -> String {
        format!("{sample}{SUMMARY_SUFFIX}.{}", self.extension())
    }

    /// File name of the aggregate report, e.g. `all_samples_summary.csv`
    #[must_use]
    pub fn aggregate_file_name(self) -> String {
        self.summary_file_name(AGGREGATE_STEM)
    }

    /// Sample name of a per-sample report file, or `None` for the aggregate
    /// and for files that are not reports in this format
    #[must_use]
    pub fn sample_of_summary<'a>(self, file_name: &'a str) -> Option<&'a str> {
        let suffix = format!("{SUMMARY_SUFFIX}.{}", self.extension());
        let sample = file_name.strip_suffix(suffix.as_str())?;
        if sample.is_empty() || sample == AGGREGATE_STEM {
            None
        } else {
            Some(sample)
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error on {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write progress output: {0}")]
    Progress(#[source] std::io::Error),

    #[error(transparent)]
    InvalidSample(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_file_names() {
        assert_eq!(
            ReportFormat::Text.summary_file_name("sampleA"),
            "sampleA_summary.txt"
        );
        assert_eq!(
            ReportFormat::Tsv.aggregate_file_name(),
            "all_samples_summary.tsv"
        );
    }

    #[test]
    fn test_sample_of_summary() {
        let csv = ReportFormat::Csv;
        assert_eq!(csv.sample_of_summary("sampleA_summary.csv"), Some("sampleA"));
        assert_eq!(csv.sample_of_summary("a_b_summary.csv"), Some("a_b"));
        assert_eq!(csv.sample_of_summary("all_samples_summary.csv"), None);
        assert_eq!(csv.sample_of_summary("sampleA_summary.txt"), None);
        assert_eq!(csv.sample_of_summary("_summary.csv"), None);
        assert_eq!(csv.sample_of_summary("reads.csv"), None);
    }
}
