use std::path::Path;

use tracing::{info, warn};

use crate::core::counts::{PairedCountMap, PairedCounts};
use crate::counting::{scan_read_files, tally_file, CountError};
use crate::parsing::file_name::{file_name_str, parse_paired_name, OrientationToken};

/// Count bases and reads per sample and mate for a directory of paired-end reads.
///
/// A sample appears in the result with both mates as soon as any file names
/// it, even if that file's mate token is unrecognized or the other mate's
/// file is absent; missing mates stay at zero.
///
/// Files whose orientation token is neither `1`/`R1` nor `2`/`R2` contribute
/// nothing and are reported with a warning; they are not opened either, so
/// a damaged file of that kind does not fail the run. Files whose sample
/// name cannot become a report file name are skipped with a warning before
/// anything is counted.
///
/// # Errors
///
/// Returns a `CountError` if the directory cannot be listed or any recognized
/// file cannot be opened or decompressed. No counts are returned in that case.
pub fn count_paired_directory(dir: &Path) -> Result<PairedCountMap, CountError> {
    let mut counts = PairedCountMap::new();

    for path in scan_read_files(dir)? {
        let Some(file_name) = file_name_str(&path) else {
            continue;
        };
        let parsed = match parse_paired_name(file_name) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Unusable sample name, skipping");
                continue;
            }
        };

        let sample_counts: &mut PairedCounts = counts.entry(parsed.sample).or_default();

        match parsed.orientation {
            OrientationToken::Known(orientation) => {
                *sample_counts.get_mut(orientation) += tally_file(&path)?;
            }
            OrientationToken::Unrecognized(token) => {
                warn!(
                    file = %path.display(),
                    token = %token,
                    "Orientation token is not 1, R1, 2 or R2; file was not read or checked and its reads are not counted"
                );
            }
        }
    }

    info!(
        dir = %dir.display(),
        samples = counts.len(),
        "Counted paired-end reads"
    );
    Ok(counts)
}
