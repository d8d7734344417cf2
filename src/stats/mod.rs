//!
//! # Read-processing statistics
//! Aggregates the Tri-C pipeline's per-sample report files into alignment and
//! filtering statistics plus the n-way contact breakdown, for the `stats`
//! bar-chart figure and table.
//!
pub mod cli;
pub mod consts;
pub mod plot;

use std::path::Path;

use anyhow::{Context, Result};

use crate::report::{read_report_counts, read_report_lines};
use consts::*;

///
/// Per-sample read-processing statistics. Raw counts from the flashed and
/// non-flashed reports are summed; the n-way buckets come from the combined
/// report's contact-count lines.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    pub sample: String,
    pub total_readpairs: u64,
    pub aligned: u64,
    pub capture_only: u64,
    pub capture_reporter: u64,
    pub no_capture: u64,
    pub single_capture: u64,
    pub unique: u64,
    pub two_way: u64,
    pub three_way: u64,
    pub many_way: u64,
}

impl SampleStats {
    /// A raw count as a percentage of total read pairs.
    pub fn pct(&self, count: u64) -> f64 {
        count as f64 / self.total_readpairs as f64 * 100.0
    }
}

fn summed_count(
    flashed: &std::collections::HashMap<String, Vec<u64>>,
    nonflashed: &std::collections::HashMap<String, Vec<u64>>,
    key: &str,
) -> u64 {
    flashed[key].iter().sum::<u64>() + nonflashed[key].iter().sum::<u64>()
}

///
/// Build the statistics for one sample from its three report files.
///
/// # Arguments
///
/// - sample: sample name, carried through to the output
/// - flashed / nonflashed: full report files for flashed and non-flashed reads
/// - combined: full combined report file
/// - total_readpairs: total number of read pairs that entered the pipeline
///
pub fn collect_sample_stats(
    sample: &str,
    flashed: &Path,
    nonflashed: &Path,
    combined: &Path,
    total_readpairs: u64,
) -> Result<SampleStats> {
    let flashed = read_report_counts(flashed, &FLASH_REPORT_KEYS)?;
    let nonflashed = read_report_counts(nonflashed, &FLASH_REPORT_KEYS)?;
    let combined = read_report_lines(combined, &COMBINED_REPORT_KEYS)?;

    let mut two_way = 0;
    let mut three_way = 0;
    let mut many_way = 0;
    for line in &combined[KEY_CONTACT_COUNTS] {
        let fields: Vec<&str> = line.split('\t').collect();
        let count: u64 = fields
            .get(1)
            .with_context(|| format!("Contact-count line has no count field: {:?}", line))?
            .trim()
            .parse()
            .with_context(|| format!("Invalid contact count in line: {:?}", line))?;

        if fields[0].contains(TWO_WAY_MARKER) {
            two_way += count;
        } else if fields[0].contains(THREE_WAY_MARKER) {
            three_way += count;
        } else {
            many_way += count;
        }
    }

    Ok(SampleStats {
        sample: sample.to_string(),
        total_readpairs,
        aligned: summed_count(&flashed, &nonflashed, KEY_ALIGNED),
        capture_only: summed_count(&flashed, &nonflashed, KEY_CAPTURE),
        capture_reporter: summed_count(&flashed, &nonflashed, KEY_CAPTURE_REPORTER),
        no_capture: summed_count(&flashed, &nonflashed, KEY_NO_CAPTURE),
        single_capture: summed_count(&flashed, &nonflashed, KEY_SINGLE_CAPTURE),
        unique: summed_count(&flashed, &nonflashed, KEY_DEDUPLICATED),
        two_way,
        three_way,
        many_way,
    })
}

///
/// Write the statistics table as a tsv, one sample per row, raw counts and
/// percentages side by side.
///
pub fn write_stats_table(stats: &[SampleStats], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to create stats table: {:?}", path))?;

    writer.write_record([
        "sample",
        "total_readpairs",
        "aligned",
        "aligned_pct",
        "capture_only",
        "capture_only_pct",
        "capture_reporter",
        "capture_reporter_pct",
        "no_capture",
        "single_capture",
        "unique",
        "unique_pct",
        "two_way",
        "three_way",
        "many_way",
    ])?;

    for s in stats {
        writer.write_record([
            s.sample.clone(),
            s.total_readpairs.to_string(),
            s.aligned.to_string(),
            format!("{:.3}", s.pct(s.aligned)),
            s.capture_only.to_string(),
            format!("{:.3}", s.pct(s.capture_only)),
            s.capture_reporter.to_string(),
            format!("{:.3}", s.pct(s.capture_reporter)),
            s.no_capture.to_string(),
            s.single_capture.to_string(),
            s.unique.to_string(),
            format!("{:.3}", s.pct(s.unique)),
            s.two_way.to_string(),
            s.three_way.to_string(),
            s.many_way.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn flash_report() -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            "11\taligned reads\t4500\n\
             11b\treads with capture\t3000\n\
             11c\treads with capture and reporter\t2250\n\
             11d\treads without capture or reporter\t400\n\
             11f\tsingle-capture reads\t350\n\
             16\tdeduplicated reads\t2000\n"
        )
        .unwrap();
        tmp
    }

    fn combined_report() -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            "16\ttotal deduplicated reads\t8000\n\
             16bb\tReads having 1 contacts\t5000\n\
             16bb\tReads having 2 contacts\t2000\n\
             16bb\tReads having 3 contacts\t700\n\
             16bb\tReads having 4 contacts\t300\n"
        )
        .unwrap();
        tmp
    }

    #[rstest]
    fn test_collect_sample_stats() {
        let flashed = flash_report();
        let nonflashed = flash_report();
        let combined = combined_report();

        let stats = collect_sample_stats(
            "WT_0_1",
            flashed.path(),
            nonflashed.path(),
            combined.path(),
            10_000,
        )
        .unwrap();

        assert_eq!(stats.aligned, 9000);
        assert_eq!(stats.capture_only, 6000);
        assert_eq!(stats.capture_reporter, 4500);
        assert_eq!(stats.unique, 4000);
        assert_eq!(stats.pct(stats.aligned), 90.0);

        assert_eq!(stats.two_way, 5000);
        assert_eq!(stats.three_way, 2000);
        assert_eq!(stats.many_way, 1000);
    }

    #[rstest]
    fn test_write_stats_table() {
        let flashed = flash_report();
        let combined = combined_report();
        let stats = collect_sample_stats(
            "WT_0_1",
            flashed.path(),
            flashed.path(),
            combined.path(),
            10_000,
        )
        .unwrap();

        let out = NamedTempFile::new().unwrap();
        write_stats_table(&[stats], out.path()).unwrap();

        let table = std::fs::read_to_string(out.path()).unwrap();
        let mut lines = table.lines();
        assert!(lines.next().unwrap().starts_with("sample\ttotal_readpairs"));
        assert!(lines.next().unwrap().starts_with("WT_0_1\t10000\t9000\t90.000"));
    }
}
