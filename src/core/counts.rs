use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::core::types::{Orientation, SampleKey};

/// Base and read totals for one stream of reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadTally {
    pub bases: u64,
    pub reads: u64,
}

impl ReadTally {
    #[must_use]
    pub fn new(bases: u64, reads: u64) -> Self {
        Self { bases, reads }
    }

    /// Record one sequence line of `length` bases
    pub fn add_read(&mut self, length: u64) {
        self.bases += length;
        self.reads += 1;
    }

    /// Mean read length, or `None` when no reads were seen
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_length(&self) -> Option<f64> {
        if self.reads == 0 {
            None
        } else {
            Some(self.bases as f64 / self.reads as f64)
        }
    }
}

impl AddAssign for ReadTally {
    fn add_assign(&mut self, other: Self) {
        self.bases += other.bases;
        self.reads += other.reads;
    }
}

/// Counts for a paired-end sample. Both mates are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedCounts {
    pub r1: ReadTally,
    pub r2: ReadTally,
}

impl PairedCounts {
    #[must_use]
    pub fn get(&self, orientation: Orientation) -> &ReadTally {
        match orientation {
            Orientation::R1 => &self.r1,
            Orientation::R2 => &self.r2,
        }
    }

    pub fn get_mut(&mut self, orientation: Orientation) -> &mut ReadTally {
        match orientation {
            Orientation::R1 => &mut self.r1,
            Orientation::R2 => &mut self.r2,
        }
    }

    #[must_use]
    pub fn total_bases(&self) -> u64 {
        self.r1.bases + self.r2.bases
    }
}

/// Counts for a single-end (long read) sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleCounts {
    pub tally: ReadTally,
}

impl SingleCounts {
    #[must_use]
    pub fn bases(&self) -> u64 {
        self.tally.bases
    }

    #[must_use]
    pub fn reads(&self) -> u64 {
        self.tally.reads
    }

    #[must_use]
    pub fn average_read_length(&self) -> Option<f64> {
        self.tally.average_length()
    }
}

/// Paired-end counts for every sample in a run, in sample order
pub type PairedCountMap = BTreeMap<SampleKey, PairedCounts>;

/// Single-end counts for every sample in a run, in sample order
pub type SingleCountMap = BTreeMap<SampleKey, SingleCounts>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_accumulates() {
        let mut tally = ReadTally::default();
        tally.add_read(100);
        tally.add_read(50);
        assert_eq!(tally, ReadTally::new(150, 2));

        tally += ReadTally::new(10, 1);
        assert_eq!(tally, ReadTally::new(160, 3));
    }

    #[test]
    fn test_average_length_undefined_without_reads() {
        assert_eq!(ReadTally::default().average_length(), None);
        assert_eq!(ReadTally::new(5000, 10).average_length(), Some(500.0));
    }

    #[test]
    fn test_paired_counts_orientation_access() {
        let mut counts = PairedCounts::default();
        counts.get_mut(Orientation::R2).add_read(75);
        assert_eq!(counts.get(Orientation::R1), &ReadTally::default());
        assert_eq!(counts.get(Orientation::R2).bases, 75);
        assert_eq!(counts.total_bases(), 75);
    }
}
