use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::core::types::ReferenceSize;
use crate::parsing::reference::reference_size_from_file;
use crate::pipeline::{self, RunConfig, RunMode};
use crate::report::ReportFormat;

/// Arguments for the illumina command
#[derive(Args)]
pub struct IlluminaArgs {
    /// Directory containing Illumina reads in FASTQ.gz format
    #[arg(long)]
    pub illumina_dir: PathBuf,

    #[command(flatten)]
    pub options: RunOptions,
}

/// Arguments for the nanopore command
#[derive(Args)]
pub struct NanoporeArgs {
    /// Directory containing Nanopore reads in FASTQ.gz format
    #[arg(long)]
    pub nanopore_dir: PathBuf,

    #[command(flatten)]
    pub options: RunOptions,
}

/// Arguments for the hybrid command
#[derive(Args)]
pub struct HybridArgs {
    /// Directory containing Illumina reads in FASTQ.gz format
    #[arg(long)]
    pub illumina_dir: PathBuf,

    /// Directory containing Nanopore reads in FASTQ.gz format
    #[arg(long)]
    pub nanopore_dir: PathBuf,

    #[command(flatten)]
    pub options: RunOptions,
}

/// Options shared by every counting command
#[derive(Args)]
pub struct RunOptions {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Directory to write per-sample and aggregate reports to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not merge per-sample reports into an aggregate
    #[arg(long)]
    pub no_merge: bool,
}

/// Where the reference genome size comes from
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ReferenceArgs {
    /// Size of the reference genome in bases
    #[arg(short = 'r', long)]
    pub ref_size: Option<u64>,

    /// FASTA index (.fai) or FASTA file (.fa/.fasta/.fna, optionally gzipped)
    /// to take the reference genome size from
    #[arg(long)]
    pub reference: Option<PathBuf>,
}

impl ReferenceArgs {
    /// Resolve the reference size from whichever option was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero or the reference file cannot be read.
    pub fn resolve(&self) -> anyhow::Result<ReferenceSize> {
        match (self.ref_size, &self.reference) {
            (Some(size), _) => Ok(ReferenceSize::new(size)?),
            (None, Some(path)) => reference_size_from_file(path)
                .with_context(|| format!("Failed to read reference {}", path.display())),
            (None, None) => anyhow::bail!("Please provide the size of the reference genome."),
        }
    }
}

impl IlluminaArgs {
    #[must_use]
    pub fn into_parts(self) -> (RunMode, RunOptions) {
        let mode = RunMode::Illumina {
            illumina_dir: self.illumina_dir,
        };
        (mode, self.options)
    }
}

impl NanoporeArgs {
    #[must_use]
    pub fn into_parts(self) -> (RunMode, RunOptions) {
        let mode = RunMode::Nanopore {
            nanopore_dir: self.nanopore_dir,
        };
        (mode, self.options)
    }
}

impl HybridArgs {
    #[must_use]
    pub fn into_parts(self) -> (RunMode, RunOptions) {
        let mode = RunMode::Hybrid {
            illumina_dir: self.illumina_dir,
            nanopore_dir: self.nanopore_dir,
        };
        (mode, self.options)
    }
}

/// Execute one of the counting commands
///
/// # Errors
///
/// Returns an error if the configuration is invalid, reads cannot be counted,
/// or reports cannot be written.
pub fn run(mode: RunMode, options: RunOptions, format: ReportFormat) -> anyhow::Result<()> {
    let reference_size = options.reference.resolve()?;
    let platform = mode.platform();

    let config = RunConfig {
        mode,
        reference_size,
        format,
        output_dir: options.output_dir,
        merge: !options.no_merge,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = pipeline::run(&config, &mut out)?;

    if summary.reports.is_empty() {
        writeln!(out, "No {platform} samples found.")?;
    }
    if let Some(outcome) = summary.merge {
        writeln!(out, "{outcome}")?;
    }

    Ok(())
}
