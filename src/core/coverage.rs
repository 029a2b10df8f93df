//! Coverage of a reference genome by sequenced bases.
//!
//! Coverage is the plain ratio `total_bases / reference_size`. Hybrid coverage
//! adds the per-platform ratios together, treating each platform as an
//! additive depth contribution. That holds for raw base depth only; it is not
//! a breadth of coverage or a probability.

use crate::core::counts::{PairedCounts, SingleCounts};
use crate::core::types::ReferenceSize;

/// Depth of coverage expressed as a multiple of the reference size
pub type CoverageValue = f64;

/// Computes coverage ratios against a fixed reference size
#[derive(Debug, Clone, Copy)]
pub struct CoverageCalculator {
    reference_size: ReferenceSize,
}

impl CoverageCalculator {
    #[must_use]
    pub fn new(reference_size: ReferenceSize) -> Self {
        Self { reference_size }
    }

    #[must_use]
    pub fn reference_size(&self) -> ReferenceSize {
        self.reference_size
    }

    /// Coverage of all bases across the supplied paired and single-end counts.
    ///
    /// Either set may be empty; an empty set contributes nothing. Reports call
    /// this with one sample at a time so the figure is per sample.
    #[must_use]
    pub fn coverage<'a, P, S>(&self, paired: P, single: S) -> CoverageValue
    where
        P: IntoIterator<Item = &'a PairedCounts>,
        S: IntoIterator<Item = &'a SingleCounts>,
    {
        let paired_bases: u64 = paired.into_iter().map(PairedCounts::total_bases).sum();
        let single_bases: u64 = single.into_iter().map(SingleCounts::bases).sum();
        self.coverage_of_bases(paired_bases + single_bases)
    }

    /// Coverage of one paired-end sample
    #[must_use]
    pub fn paired_coverage(&self, counts: &PairedCounts) -> CoverageValue {
        self.coverage(std::iter::once(counts), std::iter::empty())
    }

    /// Coverage of one single-end sample
    #[must_use]
    pub fn single_coverage(&self, counts: &SingleCounts) -> CoverageValue {
        self.coverage(std::iter::empty(), std::iter::once(counts))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_of_bases(&self, bases: u64) -> CoverageValue {
        bases as f64 / self.reference_size.get() as f64
    }
}

/// Coverage of a sample sequenced on both platforms
#[must_use]
pub fn hybrid_coverage(paired: CoverageValue, single: CoverageValue) -> CoverageValue {
    paired + single
}
