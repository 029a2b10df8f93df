//! Core data types for coverage estimation.
//!
//! - [`SampleKey`](types::SampleKey), [`Orientation`](types::Orientation):
//!   identity of a read file's sample and mate
//! - [`ReadTally`](counts::ReadTally), [`PairedCounts`](counts::PairedCounts),
//!   [`SingleCounts`](counts::SingleCounts): per-sample accumulators
//! - [`ReferenceSize`](types::ReferenceSize): positive genome length for a run
//! - [`CoverageCalculator`](coverage::CoverageCalculator): bases over genome size
//!
//! ## Platforms
//!
//! | Platform | Reads | Counts kept |
//! |----------|-------|-------------|
//! | Illumina | paired-end | bases and reads per mate (R1, R2) |
//! | Nanopore | single-end | bases, reads, average read length |
//! | Hybrid   | both | both of the above, coverages summed |

pub mod counts;
pub mod coverage;
pub mod types;
