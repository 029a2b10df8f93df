//! Per-sample report records and how they are built from counts.
//!
//! Field names double as the column headers of tabular reports and the keys
//! of JSON reports. Floating values are carried as full-precision `f64` and
//! rendered with two decimals on output.

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::core::counts::{PairedCountMap, PairedCounts, SingleCountMap, SingleCounts};
use crate::core::coverage::{hybrid_coverage, CoverageCalculator, CoverageValue};
use crate::core::types::{Platform, ReferenceSize, SampleKey};

/// Serialize a float with exactly two decimal places
#[allow(clippy::trivially_copy_pass_by_ref)]
fn two_decimals<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{value:.2}"))
}

/// Illumina paired-end sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IlluminaReport {
    #[serde(rename = "Sample")]
    pub sample: SampleKey,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(skip)]
    pub reference_size: ReferenceSize,
    #[serde(rename = "R1 Bases")]
    pub r1_bases: u64,
    #[serde(rename = "R2 Bases")]
    pub r2_bases: u64,
    #[serde(rename = "R1 Reads")]
    pub r1_reads: u64,
    #[serde(rename = "R2 Reads")]
    pub r2_reads: u64,
    #[serde(rename = "Coverage", serialize_with = "two_decimals")]
    pub coverage: CoverageValue,
}

/// Nanopore single-end sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NanoporeReport {
    #[serde(rename = "Sample")]
    pub sample: SampleKey,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(skip)]
    pub reference_size: ReferenceSize,
    #[serde(rename = "Bases")]
    pub bases: u64,
    #[serde(rename = "Reads")]
    pub reads: u64,
    #[serde(rename = "Average Length", serialize_with = "two_decimals")]
    pub average_length: f64,
    #[serde(rename = "Coverage", serialize_with = "two_decimals")]
    pub coverage: CoverageValue,
}

/// Sample sequenced on both platforms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridReport {
    #[serde(rename = "Sample")]
    pub sample: SampleKey,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(skip)]
    pub reference_size: ReferenceSize,
    #[serde(rename = "Illumina R1 Bases")]
    pub illumina_r1_bases: u64,
    #[serde(rename = "Illumina R2 Bases")]
    pub illumina_r2_bases: u64,
    #[serde(rename = "Illumina R1 Reads")]
    pub illumina_r1_reads: u64,
    #[serde(rename = "Illumina R2 Reads")]
    pub illumina_r2_reads: u64,
    #[serde(rename = "Nanopore Bases")]
    pub nanopore_bases: u64,
    #[serde(rename = "Nanopore Reads")]
    pub nanopore_reads: u64,
    #[serde(rename = "Nanopore Average Length", serialize_with = "two_decimals")]
    pub nanopore_average_length: f64,
    #[serde(rename = "Illumina Coverage", serialize_with = "two_decimals")]
    pub illumina_coverage: CoverageValue,
    #[serde(rename = "Nanopore Coverage", serialize_with = "two_decimals")]
    pub nanopore_coverage: CoverageValue,
    #[serde(rename = "Hybrid Coverage", serialize_with = "two_decimals")]
    pub hybrid_coverage: CoverageValue,
}

/// One report record for one sample
#[derive(Debug, Clone, PartialEq)]
pub enum SampleReport {
    Illumina(IlluminaReport),
    Nanopore(NanoporeReport),
    Hybrid(HybridReport),
}

impl SampleReport {
    #[must_use]
    pub fn sample(&self) -> &SampleKey {
        match self {
            Self::Illumina(r) => &r.sample,
            Self::Nanopore(r) => &r.sample,
            Self::Hybrid(r) => &r.sample,
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            Self::Illumina(_) => Platform::Illumina,
            Self::Nanopore(_) => Platform::Nanopore,
            Self::Hybrid(_) => Platform::Hybrid,
        }
    }

    #[must_use]
    pub fn reference_size(&self) -> ReferenceSize {
        match self {
            Self::Illumina(r) => r.reference_size,
            Self::Nanopore(r) => r.reference_size,
            Self::Hybrid(r) => r.reference_size,
        }
    }

    /// Human-readable `Key: value` lines describing the sample's counts and coverage
    #[must_use]
    pub fn body_lines(&self) -> Vec<String> {
        match self {
            Self::Illumina(r) => vec![
                format!("Illumina sample: {}", r.sample),
                format!("Illumina R1 bases sequenced: {}", r.r1_bases),
                format!("Illumina R2 bases sequenced: {}", r.r2_bases),
                format!("Illumina R1 reads: {}", r.r1_reads),
                format!("Illumina R2 reads: {}", r.r2_reads),
                format!("Illumina coverage: {:.2}x", r.coverage),
            ],
            Self::Nanopore(r) => vec![
                format!("Nanopore sample: {}", r.sample),
                format!("Nanopore bases sequenced: {}", r.bases),
                format!("Nanopore reads: {}", r.reads),
                format!("Nanopore average read length: {:.2}", r.average_length),
                format!("Nanopore coverage: {:.2}x", r.coverage),
            ],
            Self::Hybrid(r) => vec![
                format!("Hybrid sample: {}", r.sample),
                format!("Illumina R1 bases sequenced: {}", r.illumina_r1_bases),
                format!("Illumina R2 bases sequenced: {}", r.illumina_r2_bases),
                format!("Illumina R1 reads: {}", r.illumina_r1_reads),
                format!("Illumina R2 reads: {}", r.illumina_r2_reads),
                format!("Nanopore bases sequenced: {}", r.nanopore_bases),
                format!("Nanopore reads: {}", r.nanopore_reads),
                format!(
                    "Nanopore average read length: {:.2}",
                    r.nanopore_average_length
                ),
                format!("Illumina coverage: {:.2}x", r.illumina_coverage),
                format!("Nanopore coverage: {:.2}x", r.nanopore_coverage),
                format!("Hybrid coverage: {:.2}x", r.hybrid_coverage),
            ],
        }
    }
}

fn illumina_report(
    sample: &SampleKey,
    counts: &PairedCounts,
    calculator: &CoverageCalculator,
) -> IlluminaReport {
    IlluminaReport {
        sample: sample.clone(),
        platform: Platform::Illumina,
        reference_size: calculator.reference_size(),
        r1_bases: counts.r1.bases,
        r2_bases: counts.r2.bases,
        r1_reads: counts.r1.reads,
        r2_reads: counts.r2.reads,
        coverage: calculator.paired_coverage(counts),
    }
}

/// Build one record per paired-end sample
#[must_use]
pub fn illumina_reports(
    counts: &PairedCountMap,
    calculator: &CoverageCalculator,
) -> Vec<SampleReport> {
    counts
        .iter()
        .map(|(sample, c)| SampleReport::Illumina(illumina_report(sample, c, calculator)))
        .collect()
}

fn nanopore_report(
    sample: &SampleKey,
    counts: &SingleCounts,
    calculator: &CoverageCalculator,
) -> Option<NanoporeReport> {
    let Some(average_length) = counts.average_read_length() else {
        warn!(sample = %sample, "No Nanopore reads, average read length undefined; skipping sample");
        return None;
    };

    Some(NanoporeReport {
        sample: sample.clone(),
        platform: Platform::Nanopore,
        reference_size: calculator.reference_size(),
        bases: counts.bases(),
        reads: counts.reads(),
        average_length,
        coverage: calculator.single_coverage(counts),
    })
}

/// Build one record per single-end sample.
///
/// Samples without any reads have no average read length and are left out.
#[must_use]
pub fn nanopore_reports(
    counts: &SingleCountMap,
    calculator: &CoverageCalculator,
) -> Vec<SampleReport> {
    counts
        .iter()
        .filter_map(|(sample, c)| nanopore_report(sample, c, calculator))
        .map(SampleReport::Nanopore)
        .collect()
}

/// Build one record per sample present in both the paired and single-end sets.
///
/// Samples seen on only one platform are dropped. Samples without any
/// Nanopore reads are dropped as well, since their average is undefined.
#[must_use]
pub fn hybrid_reports(
    paired: &PairedCountMap,
    single: &SingleCountMap,
    calculator: &CoverageCalculator,
) -> Vec<SampleReport> {
    for sample in paired.keys().filter(|s| !single.contains_key(*s)) {
        debug!(sample = %sample, "Only Illumina reads found; not part of hybrid report");
    }
    for sample in single.keys().filter(|s| !paired.contains_key(*s)) {
        debug!(sample = %sample, "Only Nanopore reads found; not part of hybrid report");
    }

    paired
        .iter()
        .filter_map(|(sample, paired_counts)| {
            let single_counts = single.get(sample)?;
            let illumina = illumina_report(sample, paired_counts, calculator);
            let nanopore = nanopore_report(sample, single_counts, calculator)?;

            Some(SampleReport::Hybrid(HybridReport {
                sample: sample.clone(),
                platform: Platform::Hybrid,
                reference_size: calculator.reference_size(),
                illumina_r1_bases: illumina.r1_bases,
                illumina_r2_bases: illumina.r2_bases,
                illumina_r1_reads: illumina.r1_reads,
                illumina_r2_reads: illumina.r2_reads,
                nanopore_bases: nanopore.bases,
                nanopore_reads: nanopore.reads,
                nanopore_average_length: nanopore.average_length,
                illumina_coverage: illumina.coverage,
                nanopore_coverage: nanopore.coverage,
                hybrid_coverage: hybrid_coverage(illumina.coverage, nanopore.coverage),
            }))
        })
        .collect()
}
