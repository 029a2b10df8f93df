//! Parsers for read file names, compressed FASTQ streams and reference files.
//!
//! This module provides:
//!
//! - **File names**: map `sampleA_R1.fastq.gz` to a sample key and orientation
//! - **FASTQ**: stream a gzip-compressed FASTQ and count bases and reads
//! - **Reference**: total genome length from a `.fai` index or FASTA file
//!
//! ## Example
//!
//! ```rust,no_run
//! use read_coverage::parsing::fastq::{open_gzipped, tally_reader};
//! use std::path::Path;
//!
//! let reader = open_gzipped(Path::new("sampleA_R1.fastq.gz")).unwrap();
//! let tally = tally_reader(reader).unwrap();
//! println!("{} bases in {} reads", tally.bases, tally.reads);
//! ```

pub mod fastq;
pub mod file_name;
pub mod reference;
