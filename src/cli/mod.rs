//! Command-line interface for read-coverage.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **illumina**: Paired-end coverage per sample
//! - **nanopore**: Long-read coverage and average read length per sample
//! - **hybrid**: Illumina plus Nanopore coverage for samples seen on both
//! - **merge**: Concatenate existing per-sample reports into one aggregate
//!
//! ## Usage
//!
//! ```text
//! # Illumina paired-end reads against a 3.1 Gb reference
//! read-coverage illumina --illumina-dir reads/ -r 3100000000
//!
//! # Reference size taken from a FASTA index
//! read-coverage nanopore --nanopore-dir ont/ --reference hg38.fa.fai
//!
//! # Hybrid coverage, tabular output into a separate directory
//! read-coverage -f csv hybrid --illumina-dir reads/ --nanopore-dir ont/ \
//!     -r 5000000 -o reports/
//!
//! # Re-merge reports written earlier
//! read-coverage -f csv merge -o reports/
//! ```

use clap::{Parser, Subcommand};

use crate::report::ReportFormat;

pub mod merge;
pub mod run;

#[derive(Parser)]
#[command(name = "read-coverage")]
#[command(version)]
#[command(about = "Calculate coverage of a reference genome from FASTQ.gz reads")]
#[command(
    long_about = "read-coverage estimates sequencing depth of a reference genome from gzip-compressed FASTQ files.\n\nIt supports:\n- Illumina paired-end reads (R1/R2 counted separately)\n- Nanopore long reads (with average read length)\n- Hybrid mode, summing both platforms' coverage per sample\n\nOne summary file is written per sample, and an aggregate when there are two or more."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Coverage from Illumina paired-end reads
    Illumina(run::IlluminaArgs),

    /// Coverage and average read length from Nanopore reads
    Nanopore(run::NanoporeArgs),

    /// Combined Illumina and Nanopore coverage per sample
    Hybrid(run::HybridArgs),

    /// Merge per-sample reports into all_samples_summary
    Merge(merge::MergeArgs),
}
