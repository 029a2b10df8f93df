//! Streaming base and read counts over gzip-compressed FASTQ.
//!
//! Records are assumed to be exactly four lines (header, sequence, separator,
//! quality). Lines are classified by position alone: the line at 0-based
//! position `n` is a sequence line when `n % 4 == 1`. Nothing else in the
//! record is inspected, so quality lines starting with `@` are never mistaken
//! for headers.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::core::counts::ReadTally;

/// Position of the sequence line within a 4-line record
const SEQUENCE_LINE: usize = 1;
const LINES_PER_RECORD: usize = 4;

const READ_BUFFER_CAPACITY: usize = 1 << 20;

/// Length of a line with leading and trailing ASCII whitespace removed
fn trimmed_len(line: &[u8]) -> usize {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    end - start
}

/// Count bases and reads from an already-decompressed FASTQ stream.
///
/// # Errors
///
/// Returns any I/O error raised by the underlying reader, including
/// decompression failures surfaced through it.
pub fn tally_reader<R: BufRead>(mut reader: R) -> io::Result<ReadTally> {
    let mut tally = ReadTally::default();
    let mut line = Vec::with_capacity(512);
    let mut line_num = 0usize;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line_num % LINES_PER_RECORD == SEQUENCE_LINE {
            tally.add_read(trimmed_len(&line) as u64);
        }
        line_num += 1;
    }

    Ok(tally)
}

/// Open a gzip (or bgzip) compressed FASTQ file as a buffered line reader
///
/// # Errors
///
/// Returns `io::Error` if the file cannot be opened.
pub fn open_gzipped(path: &Path) -> io::Result<impl BufRead> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(
        READ_BUFFER_CAPACITY,
        MultiGzDecoder::new(file),
    ))
}
