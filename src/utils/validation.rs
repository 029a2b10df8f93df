//! Centralized validation of run configuration and report file names.

use std::path::{Path, PathBuf};

/// Longest sample name that can still form a report file name
pub const MAX_SAMPLE_NAME_LENGTH: usize = 200;

/// Sample name taken by the aggregate report
pub const RESERVED_SAMPLE_NAME: &str = "all_samples";

/// Configuration and naming validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Reference genome size must be greater than zero")]
    ZeroReferenceSize,
    #[error("Input directory does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Sample name too long: exceeds {MAX_SAMPLE_NAME_LENGTH} characters")]
    SampleNameTooLong,
    #[error("Invalid sample name '{0}': cannot be used as a file name")]
    InvalidSampleName(String),
    #[error("Empty sample name")]
    EmptySampleName,
    #[error("Sample name '{0}' is reserved for the aggregate report")]
    ReservedSampleName(String),
}

/// Check that an input path exists and is a directory.
///
/// # Errors
///
/// Returns `ValidationError::NotADirectory` if the path is missing or is a file.
pub fn validate_input_dir(dir: &Path) -> Result<(), ValidationError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ValidationError::NotADirectory(dir.to_path_buf()))
    }
}

/// Validate that a sample name can be used as the stem of a report file.
///
/// Unlike a sanitizer this rejects rather than rewrites, so two samples can
/// never collapse onto the same report file.
///
/// # Errors
///
/// Returns `ValidationError::EmptySampleName` if the name is blank,
/// `ValidationError::SampleNameTooLong` if it exceeds the limit,
/// `ValidationError::ReservedSampleName` for the aggregate's name, or
/// `ValidationError::InvalidSampleName` if it is `.` or `..` or contains
/// separators or control characters.
pub fn validate_sample_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptySampleName);
    }

    if name.len() > MAX_SAMPLE_NAME_LENGTH {
        return Err(ValidationError::SampleNameTooLong);
    }

    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidSampleName(name.to_string()));
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidSampleName(name.escape_default().to_string()));
    }

    if name == RESERVED_SAMPLE_NAME {
        return Err(ValidationError::ReservedSampleName(name.to_string()));
    }

    Ok(())
}
