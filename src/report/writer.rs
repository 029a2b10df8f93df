use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::report::record::SampleReport;
use crate::report::{ReportError, ReportFormat};
use crate::utils::validation::validate_sample_name;

/// Writes per-sample report files into an output directory
#[derive(Debug, Clone)]
pub struct Reporter {
    format: ReportFormat,
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            format,
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the report for `sample` is written to
    #[must_use]
    pub fn report_path(&self, sample: &str) -> PathBuf {
        self.output_dir.join(self.format.summary_file_name(sample))
    }

    /// Write every report to its own file and echo it to `progress`.
    ///
    /// Returns the paths written, in the order of `reports`. Every sample name
    /// is checked before the first file is created.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidSample` without writing anything if any
    /// sample name cannot be used as a file name. Otherwise returns a
    /// `ReportError` on the first sample that cannot be written; files already
    /// written for earlier samples are left in place.
    pub fn publish<W: Write>(
        &self,
        reports: &[SampleReport],
        progress: &mut W,
    ) -> Result<Vec<PathBuf>, ReportError> {
        for report in reports {
            validate_sample_name(report.sample().as_str())?;
        }

        let mut written = Vec::with_capacity(reports.len());
        for report in reports {
            print_progress(report, progress).map_err(ReportError::Progress)?;
            written.push(self.write_report(report)?);
        }
        Ok(written)
    }

    /// Create or overwrite the report file for one sample.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidSample` if the sample name cannot be used
    /// as a file name, or an I/O, CSV or JSON error if writing fails.
    pub fn write_report(&self, report: &SampleReport) -> Result<PathBuf, ReportError> {
        let sample = report.sample().as_str();
        validate_sample_name(sample)?;

        let path = self.report_path(sample);
        match self.format {
            ReportFormat::Text => write_text(&path, report)?,
            ReportFormat::Csv | ReportFormat::Tsv => {
                let delimiter = self.format.delimiter().unwrap_or(b',');
                write_tabular(&path, report, delimiter)?;
            }
            ReportFormat::Json => write_json(&path, report)?,
        }

        debug!(sample = %sample, path = %path.display(), "Wrote sample report");
        Ok(path)
    }
}

/// Echo a report to the live progress stream, followed by a blank line
fn print_progress<W: Write>(report: &SampleReport, progress: &mut W) -> std::io::Result<()> {
    for line in report.body_lines() {
        writeln!(progress, "{line}")?;
    }
    writeln!(progress)
}

/// Full text report: platform and reference size, then the body, then a blank line
#[must_use]
pub fn render_text(report: &SampleReport) -> String {
    let mut text = format!(
        "Sequence platform: {}\nReference genome size: {}\n",
        report.platform(),
        report.reference_size()
    );
    for line in report.body_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text.push('\n');
    text
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError + '_ {
    move |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_text(path: &Path, report: &SampleReport) -> Result<(), ReportError> {
    let mut writer = File::create(path).map(BufWriter::new).map_err(io_error(path))?;
    writer
        .write_all(render_text(report).as_bytes())
        .map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))
}

fn write_tabular(path: &Path, report: &SampleReport, delimiter: u8) -> Result<(), ReportError> {
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let result = match report {
        SampleReport::Illumina(r) => writer.serialize(r),
        SampleReport::Nanopore(r) => writer.serialize(r),
        SampleReport::Hybrid(r) => writer.serialize(r),
    };
    result.map_err(csv_error)?;

    writer.flush().map_err(io_error(path))
}

fn write_json(path: &Path, report: &SampleReport) -> Result<(), ReportError> {
    let json_error = |source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = File::create(path).map(BufWriter::new).map_err(io_error(path))?;
    let result = match report {
        SampleReport::Illumina(r) => serde_json::to_writer_pretty(&mut writer, r),
        SampleReport::Nanopore(r) => serde_json::to_writer_pretty(&mut writer, r),
        SampleReport::Hybrid(r) => serde_json::to_writer_pretty(&mut writer, r),
    };
    result.map_err(json_error)?;
    writeln!(writer).map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::counts::{PairedCountMap, PairedCounts, ReadTally, SingleCountMap, SingleCounts};
    use crate::core::coverage::CoverageCalculator;
    use crate::core::types::{ReferenceSize, SampleKey};
    use crate::report::record::{hybrid_reports, illumina_reports, nanopore_reports};
    use crate::report::AGGREGATE_STEM;
    use crate::utils::validation::ValidationError;

    fn calculator(size: u64) -> CoverageCalculator {
        CoverageCalculator::new(ReferenceSize::new(size).unwrap())
    }

    fn illumina_sample(name: &str) -> Vec<SampleReport> {
        let mut counts = PairedCountMap::new();
        counts.insert(
            SampleKey::new(name),
            PairedCounts {
                r1: ReadTally::new(400, 4),
                r2: ReadTally::new(400, 4),
            },
        );
        illumina_reports(&counts, &calculator(800))
    }

    fn nanopore_sample(name: &str) -> Vec<SampleReport> {
        let mut counts = SingleCountMap::new();
        counts.insert(
            SampleKey::new(name),
            SingleCounts {
                tally: ReadTally::new(5000, 10),
            },
        );
        nanopore_reports(&counts, &calculator(10_000))
    }

    #[test]
    fn test_text_report_content() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Text, temp.path());
        let mut progress = Vec::new();

        let written = reporter
            .publish(&illumina_sample("sampleA"), &mut progress)
            .unwrap();
        assert_eq!(written, vec![temp.path().join("sampleA_summary.txt")]);

        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(
            content,
            "Sequence platform: illumina\n\
             Reference genome size: 800\n\
             Illumina sample: sampleA\n\
             Illumina R1 bases sequenced: 400\n\
             Illumina R2 bases sequenced: 400\n\
             Illumina R1 reads: 4\n\
             Illumina R2 reads: 4\n\
             Illumina coverage: 1.00x\n\n"
        );

        let echoed = String::from_utf8(progress).unwrap();
        assert!(echoed.starts_with("Illumina sample: sampleA\n"));
        assert!(echoed.ends_with("Illumina coverage: 1.00x\n\n"));
    }

    #[test]
    fn test_csv_report_content() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Csv, temp.path());

        let path = reporter
            .write_report(&nanopore_sample("sampleB")[0])
            .unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Sample,Platform,Bases,Reads,Average Length,Coverage\n\
             sampleB,nanopore,5000,10,500.00,0.50\n"
        );
    }

    #[test]
    fn test_tsv_hybrid_report_header() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Tsv, temp.path());

        let mut paired = PairedCountMap::new();
        paired.insert(
            SampleKey::new("sampleC"),
            PairedCounts {
                r1: ReadTally::new(1500, 10),
                r2: ReadTally::new(1500, 10),
            },
        );
        let mut single = SingleCountMap::new();
        single.insert(
            SampleKey::new("sampleC"),
            SingleCounts {
                tally: ReadTally::new(2000, 2),
            },
        );
        let reports = hybrid_reports(&paired, &single, &calculator(10_000));

        let path = reporter.write_report(&reports[0]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap().split('\t').last(),
            Some("Hybrid Coverage")
        );
        let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(row[0], "sampleC");
        assert_eq!(row[1], "hybrid");
        assert_eq!(row[row.len() - 3..], ["0.30", "0.20", "0.50"]);
    }

    #[test]
    fn test_json_report_content() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Json, temp.path());

        let path = reporter
            .write_report(&illumina_sample("sampleA")[0])
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["Sample"], "sampleA");
        assert_eq!(value["R1 Bases"], 400);
        assert_eq!(value["Coverage"], "1.00");
    }

    #[test]
    fn test_report_overwrites_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Text, temp.path());
        let path = reporter.report_path("sampleA");
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        reporter.write_report(&illumina_sample("sampleA")[0]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Sequence platform: illumina\n"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_reserved_sample_name_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Text, temp.path());

        let result = reporter.write_report(&illumina_sample(AGGREGATE_STEM)[0]);
        assert!(matches!(
            result,
            Err(ReportError::InvalidSample(ValidationError::ReservedSampleName(_)))
        ));
    }

    #[test]
    fn test_publish_checks_every_name_before_writing() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(ReportFormat::Text, temp.path());
        let mut reports = illumina_sample("good");
        reports.extend(illumina_sample("bad/name"));
        let mut progress = Vec::new();

        let result = reporter.publish(&reports, &mut progress);
        assert!(matches!(
            result,
            Err(ReportError::InvalidSample(ValidationError::InvalidSampleName(_)))
        ));
        assert!(!reporter.report_path("good").exists());
        assert!(progress.is_empty());
    }
}
