//! Reference genome size from a FASTA index or FASTA file using noodles.
//!
//! Supported inputs:
//! - `.fai` (FASTA index; lengths are read directly)
//! - `.fa`, `.fasta`, `.fna` (uncompressed; every sequence is read)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz`, `.fa.bgz`, ... (gzip/bgzip compressed)

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::types::ReferenceSize;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("No sequences found in reference file: {0}")]
    Empty(String),

    #[error("Unsupported reference format: {0} (expected .fai, .fa, .fasta or .fna)")]
    UnsupportedFormat(String),
}

/// Kind of reference file, detected from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceFormat {
    Fai,
    Fasta { gzipped: bool },
}

fn detect_format(path: &Path) -> Option<ReferenceFormat> {
    let name = path.to_string_lossy().to_lowercase();

    if name.ends_with(".fai") {
        return Some(ReferenceFormat::Fai);
    }

    let (base, gzipped) = match name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bgz"))
    {
        Some(base) => (base, true),
        None => (name.as_str(), false),
    };

    [".fa", ".fasta", ".fna"]
        .iter()
        .any(|ext| base.ends_with(ext))
        .then_some(ReferenceFormat::Fasta { gzipped })
}

/// Total length of all sequences in a reference file.
///
/// # Errors
///
/// Returns `ReferenceError::UnsupportedFormat` for unknown extensions,
/// `ReferenceError::Io` if the file cannot be read, `ReferenceError::Noodles`
/// if parsing fails, or `ReferenceError::Empty` if there are no sequences or
/// their total length is zero.
pub fn reference_size_from_file(path: &Path) -> Result<ReferenceSize, ReferenceError> {
    let (contigs, total) = match detect_format(path) {
        Some(ReferenceFormat::Fai) => fai_total_length(path)?,
        Some(ReferenceFormat::Fasta { gzipped: false }) => {
            let file = std::fs::File::open(path)?;
            fasta_total_length(BufReader::new(file))?
        }
        Some(ReferenceFormat::Fasta { gzipped: true }) => {
            let file = std::fs::File::open(path)?;
            fasta_total_length(BufReader::new(MultiGzDecoder::new(file)))?
        }
        None => {
            return Err(ReferenceError::UnsupportedFormat(
                path.display().to_string(),
            ))
        }
    };

    if contigs == 0 {
        return Err(ReferenceError::Empty(path.display().to_string()));
    }

    debug!(
        path = %path.display(),
        contigs,
        total,
        "Resolved reference genome size"
    );

    ReferenceSize::new(total).map_err(|_| ReferenceError::Empty(path.display().to_string()))
}

/// Sum the lengths in a FASTA index
fn fai_total_length(path: &Path) -> Result<(usize, u64), ReferenceError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ReferenceError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let records = index.as_ref();
    let total = records.iter().map(|record| record.length()).sum();
    Ok((records.len(), total))
}

/// Sum the sequence lengths of every record in a FASTA stream
fn fasta_total_length<R: BufRead>(reader: R) -> Result<(usize, u64), ReferenceError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut contigs = 0usize;
    let mut total = 0u64;

    for result in fasta_reader.records() {
        let record = result
            .map_err(|e| ReferenceError::Noodles(format!("Failed to parse FASTA record: {e}")))?;
        contigs += 1;
        total += record.sequence().len() as u64;
    }

    Ok((contigs, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("ref.fa.fai")),
            Some(ReferenceFormat::Fai)
        );
        assert_eq!(
            detect_format(Path::new("ref.fasta")),
            Some(ReferenceFormat::Fasta { gzipped: false })
        );
        assert_eq!(
            detect_format(Path::new("/data/Ref.FNA.GZ")),
            Some(ReferenceFormat::Fasta { gzipped: true })
        );
        assert_eq!(
            detect_format(Path::new("ref.fa.bgz")),
            Some(ReferenceFormat::Fasta { gzipped: true })
        );
        assert_eq!(detect_format(Path::new("ref.bam")), None);
        assert_eq!(detect_format(Path::new("reads.fastq.gz")), None);
    }

    #[test]
    fn test_reference_size_from_fai() {
        let mut temp = NamedTempFile::with_suffix(".fai").unwrap();
        temp.write_all(b"chr1\t1000\t6\t60\t61\nchr2\t500\t1030\t60\t61\n")
            .unwrap();
        temp.flush().unwrap();

        let size = reference_size_from_file(temp.path()).unwrap();
        assert_eq!(size.get(), 1500);
    }

    #[test]
    fn test_reference_size_from_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1 description\nACGTACGT\nACGT\n>chr2\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let size = reference_size_from_file(temp.path()).unwrap();
        assert_eq!(size.get(), 16);
    }

    #[test]
    fn test_reference_size_from_gzipped_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(&mut temp, Compression::default());
            encoder.write_all(b">chrM\nACGTACGTAC\n").unwrap();
            encoder.finish().unwrap();
        }
        temp.flush().unwrap();

        let size = reference_size_from_file(temp.path()).unwrap();
        assert_eq!(size.get(), 10);
    }

    #[test]
    fn test_empty_fasta_is_an_error() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(matches!(
            reference_size_from_file(temp.path()),
            Err(ReferenceError::Empty(_))
        ));
    }

    #[test]
    fn test_unsupported_reference_format() {
        assert!(matches!(
            reference_size_from_file(Path::new("genome.2bit")),
            Err(ReferenceError::UnsupportedFormat(_))
        ));
    }
}
