//! Sample and mate inference from read file names.
//!
//! File names are parsed once, at the directory scan, into a typed
//! [`ReadFileName`]. Sample names are validated here too, so a name that
//! cannot become a report file is rejected before any reads are counted.
//! Nothing downstream looks at the raw string again.
//!
//! | File name | Sample | Orientation |
//! |-----------|--------|------|
//! | `sampleA_R1.fastq.gz` | `sampleA` | R1 |
//! | `sampleA_2.fastq.gz` | `sampleA` | R2 |
//! | `run_7_lane_R2.fq.gz` | `run_7_lane` | R2 |
//! | `sampleB.fastq.gz` | `sampleB` | R1 |
//! | `sampleC_I1.fastq.gz` | `sampleC` | unrecognized |
//! | `_R1.fastq.gz` | rejected | |

use std::path::Path;

use crate::core::types::{Orientation, SampleKey};
use crate::utils::validation::{validate_sample_name, ValidationError};

/// Suffixes that mark a gzip-compressed FASTQ file
pub const READ_FILE_SUFFIXES: [&str; 2] = [".fastq.gz", ".fq.gz"];

/// Separator between sample name and mate token in paired file names
pub const MATE_SEPARATOR: char = '_';

/// Check if a file name carries a recognized compressed read file suffix
#[must_use]
pub fn is_read_file(file_name: &str) -> bool {
    READ_FILE_SUFFIXES
        .iter()
        .any(|suffix| file_name.len() > suffix.len() && file_name.ends_with(suffix))
}

/// Orientation token parsed from a paired-end file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrientationToken {
    /// Token resolved to R1 or R2 (or defaulted to R1 when absent)
    Known(Orientation),
    /// Token present but matching neither mate; reads are not counted
    Unrecognized(String),
}

/// A paired-end read file name split into sample and orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileName {
    pub sample: SampleKey,
    pub orientation: OrientationToken,
}

impl ReadFileName {
    /// Orientation if the token was recognized
    #[must_use]
    pub fn known_orientation(&self) -> Option<Orientation> {
        match self.orientation {
            OrientationToken::Known(orientation) => Some(orientation),
            OrientationToken::Unrecognized(_) => None,
        }
    }
}

/// Text before the first `.` of a file name
fn stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Parse a paired-end read file name.
///
/// With a `_` in the name, the text after the last `_` (up to its first `.`)
/// is the mate token and the text before it is the sample. Without one, the
/// stem is the sample and the mate defaults to R1.
///
/// # Errors
///
/// Returns a `ValidationError` when the derived sample name is empty, too
/// long, reserved, or otherwise unusable as a report file name.
pub fn parse_paired_name(file_name: &str) -> Result<ReadFileName, ValidationError> {
    let (sample, orientation) = match file_name.rsplit_once(MATE_SEPARATOR) {
        Some((sample, rest)) => {
            let token = stem(rest);
            let orientation = Orientation::parse(token).map_or_else(
                || OrientationToken::Unrecognized(token.to_string()),
                OrientationToken::Known,
            );
            (sample, orientation)
        }
        None => (stem(file_name), OrientationToken::Known(Orientation::R1)),
    };

    validate_sample_name(sample)?;

    Ok(ReadFileName {
        sample: SampleKey::new(sample),
        orientation,
    })
}

/// Parse a single-end read file name: the sample is the text before the first `.`.
///
/// # Errors
///
/// Returns a `ValidationError` when the stem is empty (e.g. `.fastq.gz`) or
/// cannot be used as a report file name.
pub fn parse_single_name(file_name: &str) -> Result<SampleKey, ValidationError> {
    let sample = stem(file_name);
    validate_sample_name(sample)?;
    Ok(SampleKey::new(sample))
}

/// File name component of a path as UTF-8, if it has one
#[must_use]
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(sample: &str, orientation: Orientation) -> ReadFileName {
        ReadFileName {
            sample: SampleKey::new(sample),
            orientation: OrientationToken::Known(orientation),
        }
    }

    #[test]
    fn test_is_read_file() {
        assert!(is_read_file("sampleA_R1.fastq.gz"));
        assert!(is_read_file("sampleB.fq.gz"));

        assert!(!is_read_file("sampleA_R1.fastq"));
        assert!(!is_read_file("sampleA.fa.gz"));
        assert!(!is_read_file("sampleA_R1.FASTQ.GZ"));
        assert!(!is_read_file("notes.txt"));
    }

    #[test]
    fn test_parse_paired_mate_tokens() {
        assert_eq!(
            parse_paired_name("sampleA_R1.fastq.gz").unwrap(),
            known("sampleA", Orientation::R1)
        );
        assert_eq!(
            parse_paired_name("sampleA_R2.fastq.gz").unwrap(),
            known("sampleA", Orientation::R2)
        );
        assert_eq!(
            parse_paired_name("sampleA_1.fastq.gz").unwrap(),
            known("sampleA", Orientation::R1)
        );
        assert_eq!(
            parse_paired_name("sampleA_2.fq.gz").unwrap(),
            known("sampleA", Orientation::R2)
        );
    }

    #[test]
    fn test_parse_paired_splits_on_last_separator() {
        assert_eq!(
            parse_paired_name("run_7_lane_R2.fastq.gz").unwrap(),
            known("run_7_lane", Orientation::R2)
        );
    }

    #[test]
    fn test_parse_paired_without_separator_defaults_to_r1() {
        assert_eq!(
            parse_paired_name("sampleB.fastq.gz").unwrap(),
            known("sampleB", Orientation::R1)
        );
    }

    #[test]
    fn test_parse_paired_unrecognized_token() {
        let parsed = parse_paired_name("sampleC_I1.fastq.gz").unwrap();
        assert_eq!(parsed.sample, SampleKey::new("sampleC"));
        assert_eq!(
            parsed.orientation,
            OrientationToken::Unrecognized("I1".to_string())
        );
        assert_eq!(parsed.known_orientation(), None);

        // Illumina lane-style names keep the trailing chunk number as the token
        let parsed = parse_paired_name("S1_L001_R1_001.fastq.gz").unwrap();
        assert_eq!(parsed.sample, SampleKey::new("S1_L001_R1"));
        assert_eq!(
            parsed.orientation,
            OrientationToken::Unrecognized("001".to_string())
        );
    }

    #[test]
    fn test_parse_paired_empty_sample() {
        assert!(matches!(
            parse_paired_name("_R1.fastq.gz"),
            Err(ValidationError::EmptySampleName)
        ));
        assert!(matches!(
            parse_paired_name(".fastq.gz"),
            Err(ValidationError::EmptySampleName)
        ));
    }

    #[test]
    fn test_parse_rejects_unusable_sample_names() {
        let long_name = format!("{}_R1.fastq.gz", "s".repeat(201));
        assert!(matches!(
            parse_paired_name(&long_name),
            Err(ValidationError::SampleNameTooLong)
        ));
        assert!(matches!(
            parse_paired_name("all_samples_R1.fastq.gz"),
            Err(ValidationError::ReservedSampleName(_))
        ));
        assert!(matches!(
            parse_single_name("all_samples.fastq.gz"),
            Err(ValidationError::ReservedSampleName(_))
        ));
        assert!(matches!(
            parse_paired_name(".._R1.fastq.gz"),
            Err(ValidationError::InvalidSampleName(_))
        ));
    }

    #[test]
    fn test_parse_accepts_embedded_dots() {
        assert_eq!(
            parse_paired_name("run..2_R1.fastq.gz").unwrap(),
            known("run..2", Orientation::R1)
        );
    }

    #[test]
    fn test_parse_single_name() {
        assert_eq!(
            parse_single_name("sampleB.fastq.gz").unwrap(),
            SampleKey::new("sampleB")
        );
        assert_eq!(
            parse_single_name("sample_B_pass.fq.gz").unwrap(),
            SampleKey::new("sample_B_pass")
        );
        assert!(parse_single_name(".fastq.gz").is_err());
    }
}
