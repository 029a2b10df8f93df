//! # read-coverage
//!
//! A library for estimating how deeply a reference genome is covered by raw
//! sequencing reads.
//!
//! Given directories of gzip-compressed FASTQ files from Illumina (paired-end)
//! and/or Nanopore (long read) runs, `read-coverage` counts the bases and reads
//! of every sample and divides the bases by the reference genome size. Results
//! are written as one summary per sample and, when there are several, one
//! aggregate summary.
//!
//! ## Features
//!
//! - **Streaming counts**: FASTQ files are decompressed and scanned line by line
//! - **Mate-aware**: Illumina `_R1`/`_R2` (or `_1`/`_2`) files are counted separately
//! - **Long-read stats**: Nanopore samples report their average read length
//! - **Hybrid coverage**: Samples sequenced on both platforms get a summed coverage
//! - **Several formats**: text, CSV, TSV or JSON summaries
//!
//! ## Example
//!
//! ```rust,no_run
//! use read_coverage::counting::paired::count_paired_directory;
//! use read_coverage::{CoverageCalculator, ReferenceSize};
//! use std::path::Path;
//!
//! let counts = count_paired_directory(Path::new("illumina_reads/")).unwrap();
//! let calculator = CoverageCalculator::new(ReferenceSize::new(3_100_000_000).unwrap());
//!
//! for (sample, c) in &counts {
//!     println!("{sample}: {:.2}x", calculator.paired_coverage(c));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sample, count and coverage types
//! - [`parsing`]: File name, FASTQ and reference parsers
//! - [`counting`]: Per-sample counting over a directory of reads
//! - [`report`]: Per-sample report writing and merging
//! - [`pipeline`]: A whole run from directories to reports
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod counting;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::counts::{PairedCountMap, PairedCounts, ReadTally, SingleCountMap, SingleCounts};
pub use crate::core::coverage::{CoverageCalculator, CoverageValue};
pub use crate::core::types::*;
pub use report::record::SampleReport;
pub use report::ReportFormat;
