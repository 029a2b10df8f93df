use std::path::Path;

use tracing::{info, warn};

use crate::core::counts::SingleCountMap;
use crate::counting::{scan_read_files, tally_file, CountError};
use crate::parsing::file_name::{file_name_str, parse_single_name};

/// Count bases and reads per sample for a directory of single-end reads.
///
/// The sample is the file name up to its first `.`, so
/// `sampleB.fastq.gz` and `sampleB.pass.fastq.gz` both feed `sampleB`.
/// Files whose sample name cannot become a report file name are skipped
/// with a warning.
///
/// # Errors
///
/// Returns a `CountError` if the directory cannot be listed or any file
/// cannot be opened or decompressed. No counts are returned in that case.
pub fn count_single_directory(dir: &Path) -> Result<SingleCountMap, CountError> {
    let mut counts = SingleCountMap::new();

    for path in scan_read_files(dir)? {
        let Some(file_name) = file_name_str(&path) else {
            continue;
        };
        let sample = match parse_single_name(file_name) {
            Ok(sample) => sample,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Unusable sample name, skipping");
                continue;
            }
        };

        let tally = tally_file(&path)?;
        counts.entry(sample).or_default().tally += tally;
    }

    info!(
        dir = %dir.display(),
        samples = counts.len(),
        "Counted single-end reads"
    );
    Ok(counts)
}
