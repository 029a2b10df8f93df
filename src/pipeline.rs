//! One coverage run: count reads, compute coverage, write reports, merge.
//!
//! Each run owns its count maps and moves them through the stages; nothing is
//! shared between runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::core::coverage::CoverageCalculator;
use crate::core::types::{Platform, ReferenceSize};
use crate::counting::paired::count_paired_directory;
use crate::counting::single::count_single_directory;
use crate::counting::CountError;
use crate::report::merge::{merge_reports, MergeOutcome};
use crate::report::record::{hybrid_reports, illumina_reports, nanopore_reports, SampleReport};
use crate::report::writer::Reporter;
use crate::report::{ReportError, ReportFormat};
use crate::utils::validation::{validate_input_dir, ValidationError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    Count(#[from] CountError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input directories for the selected platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Illumina { illumina_dir: PathBuf },
    Nanopore { nanopore_dir: PathBuf },
    Hybrid {
        illumina_dir: PathBuf,
        nanopore_dir: PathBuf,
    },
}

impl RunMode {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            Self::Illumina { .. } => Platform::Illumina,
            Self::Nanopore { .. } => Platform::Nanopore,
            Self::Hybrid { .. } => Platform::Hybrid,
        }
    }

    fn input_dirs(&self) -> Vec<&Path> {
        match self {
            Self::Illumina { illumina_dir } => vec![illumina_dir.as_path()],
            Self::Nanopore { nanopore_dir } => vec![nanopore_dir.as_path()],
            Self::Hybrid {
                illumina_dir,
                nanopore_dir,
            } => vec![illumina_dir.as_path(), nanopore_dir.as_path()],
        }
    }
}

/// Everything a run needs, already validated by the caller's config layer
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub reference_size: ReferenceSize,
    pub format: ReportFormat,
    pub output_dir: PathBuf,
    /// Merge per-sample reports into an aggregate after writing them
    pub merge: bool,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<SampleReport>,
    pub written: Vec<PathBuf>,
    pub merge: Option<MergeOutcome>,
}

/// Count, compute coverage and build reports without writing anything.
///
/// # Errors
///
/// Returns `PipelineError::Config` if an input directory does not exist and
/// `PipelineError::Count` if any read file cannot be read.
pub fn collect_reports(
    mode: &RunMode,
    calculator: &CoverageCalculator,
) -> Result<Vec<SampleReport>, PipelineError> {
    for dir in mode.input_dirs() {
        validate_input_dir(dir)?;
    }

    let reports = match mode {
        RunMode::Illumina { illumina_dir } => {
            let counts = count_paired_directory(illumina_dir)?;
            illumina_reports(&counts, calculator)
        }
        RunMode::Nanopore { nanopore_dir } => {
            let counts = count_single_directory(nanopore_dir)?;
            nanopore_reports(&counts, calculator)
        }
        RunMode::Hybrid {
            illumina_dir,
            nanopore_dir,
        } => {
            let paired = count_paired_directory(illumina_dir)?;
            let single = count_single_directory(nanopore_dir)?;
            hybrid_reports(&paired, &single, calculator)
        }
    };

    Ok(reports)
}

/// Run the whole pipeline, echoing each sample's report to `progress`.
///
/// # Errors
///
/// Returns a `PipelineError` for invalid input directories, unreadable read
/// files, or report files that cannot be written.
pub fn run<W: Write>(config: &RunConfig, progress: &mut W) -> Result<RunSummary, PipelineError> {
    let calculator = CoverageCalculator::new(config.reference_size);
    let reports = collect_reports(&config.mode, &calculator)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|source| PipelineError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let reporter = Reporter::new(config.format, &config.output_dir);
    let written = reporter.publish(&reports, progress)?;

    info!(
        platform = %config.mode.platform(),
        samples = reports.len(),
        reference_size = %config.reference_size,
        "Wrote sample reports"
    );

    let merge = if config.merge {
        Some(merge_reports(&config.output_dir, config.format)?)
    } else {
        None
    };

    Ok(RunSummary {
        reports,
        written,
        merge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_platform() {
        let dir = PathBuf::from("reads");
        let mode = RunMode::Hybrid {
            illumina_dir: dir.clone(),
            nanopore_dir: dir.clone(),
        };
        assert_eq!(mode.platform(), Platform::Hybrid);
        assert_eq!(mode.input_dirs().len(), 2);
        assert_eq!(
            RunMode::Nanopore { nanopore_dir: dir }.platform(),
            Platform::Nanopore
        );
    }

    #[test]
    fn test_collect_reports_rejects_missing_input_dir() {
        let temp = tempfile::tempdir().unwrap();
        let mode = RunMode::Nanopore {
            nanopore_dir: temp.path().join("missing"),
        };
        let calculator = CoverageCalculator::new(ReferenceSize::new(100).unwrap());

        assert!(matches!(
            collect_reports(&mode, &calculator),
            Err(PipelineError::Config(ValidationError::NotADirectory(_)))
        ));
    }
}
