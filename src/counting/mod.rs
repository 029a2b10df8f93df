//! Per-sample base and read counting over a directory of FASTQ files.
//!
//! Two counters share the same streaming logic and differ only in how a file
//! name maps to a sample:
//!
//! - [`paired::count_paired_directory`]: Illumina paired-end, split by mate
//! - [`single::count_single_directory`]: Nanopore single-end
//!
//! Files are processed one at a time in file-name order. Each file is tallied
//! on its own and merged into the run's counts only after its stream has been
//! read to the end, so a corrupt file never leaves partial counts behind.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::counts::ReadTally;
use crate::parsing::fastq::{open_gzipped, tally_reader};
use crate::parsing::file_name::{file_name_str, is_read_file};

pub mod paired;
pub mod single;

#[derive(Error, Debug)]
pub enum CountError {
    /// Listing the input directory or opening a read file failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gzip stream or its contents could not be read to the end
    #[error("Failed to decompress or read {}: {source}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the compressed read files directly inside `dir`, sorted by file name.
///
/// Subdirectories and files without a recognized suffix are ignored.
///
/// # Errors
///
/// Returns `CountError::Io` if the directory cannot be listed.
pub fn scan_read_files(dir: &Path) -> Result<Vec<PathBuf>, CountError> {
    let read_dir_error = |source| CountError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();
        if path.is_file() && file_name_str(&path).is_some_and(is_read_file) {
            files.push(path);
        }
    }

    files.sort();
    debug!(dir = %dir.display(), files = files.len(), "Scanned for read files");
    Ok(files)
}

/// Stream one compressed FASTQ file to the end and return its counts.
///
/// # Errors
///
/// Returns `CountError::Io` if the file cannot be opened, or
/// `CountError::Decompress` if decompression or reading fails part way.
pub fn tally_file(path: &Path) -> Result<ReadTally, CountError> {
    let reader = open_gzipped(path).map_err(|source| CountError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tally = tally_reader(reader).map_err(|source| CountError::Decompress {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        file = %path.display(),
        bases = tally.bases,
        reads = tally.reads,
        "Counted reads"
    );
    Ok(tally)
}
