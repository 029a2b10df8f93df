use std::path::PathBuf;

use clap::Args;

use crate::report::merge::merge_reports;
use crate::report::ReportFormat;

/// Arguments for the merge command
#[derive(Args)]
pub struct MergeArgs {
    /// Directory holding the per-sample reports
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Execute the merge command
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or reports cannot be
/// read or written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MergeArgs, format: ReportFormat) -> anyhow::Result<()> {
    let outcome = merge_reports(&args.output_dir, format)?;
    println!("{outcome}");
    Ok(())
}
