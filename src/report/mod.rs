//!
//! # Pipeline report extraction
//! The Tri-C pipeline writes free-text, line-oriented reports where each line of
//! interest starts with a short alphanumeric key. These readers collect lines for
//! a closed set of keys; everything else in the file is irrelevant and skipped.
//!
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

/// Split a report line at its first whitespace run into `(key, rest)`,
/// ignoring leading and trailing whitespace. Lines without a second field
/// yield `None`.
fn split_key_rest(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let at = line.find(char::is_whitespace)?;
    let (key, rest) = line.split_at(at);
    let rest = rest.trim_start();
    if rest.is_empty() { None } else { Some((key, rest)) }
}

///
/// Collect the remainder of every line starting with a recognized key.
///
/// Unrecognized keys and lines with no second field are silently skipped; that
/// is known-irrelevant input, not an error. Every requested key is present in
/// the result, even when nothing matched it, and values keep file order. The
/// remainder may itself contain tabs.
///
pub fn read_report_lines(path: &Path, keys: &[&str]) -> Result<HashMap<String, Vec<String>>> {
    let reader = crate::common::utils::get_dynamic_reader(path)?;

    let mut extracted: HashMap<String, Vec<String>> =
        keys.iter().map(|k| (k.to_string(), Vec::new())).collect();

    for (index, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("There was an error reading line {} of {:?}", index + 1, path))?;

        if let Some((key, rest)) = split_key_rest(&line) {
            if let Some(values) = extracted.get_mut(key) {
                values.push(rest.to_string());
            }
        }
    }

    Ok(extracted)
}

///
/// Like [read_report_lines], but parse the last tab-separated field of each
/// recognized line as a read count.
///
/// A malformed count is an error: recognized lines are assumed well formed, and
/// a bad one means the upstream report is corrupt.
///
pub fn read_report_counts(path: &Path, keys: &[&str]) -> Result<HashMap<String, Vec<u64>>> {
    let reader = crate::common::utils::get_dynamic_reader(path)?;

    let mut extracted: HashMap<String, Vec<u64>> =
        keys.iter().map(|k| (k.to_string(), Vec::new())).collect();

    for (index, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("There was an error reading line {} of {:?}", index + 1, path))?;

        if let Some((key, rest)) = split_key_rest(&line) {
            if let Some(values) = extracted.get_mut(key) {
                let field = rest.rsplit('\t').next().unwrap_or(rest);
                let count: u64 = field.trim().parse().with_context(|| {
                    format!(
                        "Invalid read count {:?} for key {:?} on line {} of {:?}",
                        field,
                        key,
                        index + 1,
                        path
                    )
                })?;
                values.push(count);
            }
        }
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn report_file(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp
    }

    #[rstest]
    fn test_split_key_rest() {
        assert_eq!(split_key_rest("11b\tfoo\tbar\t42"), Some(("11b", "foo\tbar\t42")));
        assert_eq!(split_key_rest("11  spaced out"), Some(("11", "spaced out")));
        assert_eq!(split_key_rest("  11\tindented\t7"), Some(("11", "indented\t7")));
        assert_eq!(split_key_rest("lonely"), None);
        assert_eq!(split_key_rest("trailing \t "), None);
        assert_eq!(split_key_rest(""), None);
    }

    #[rstest]
    fn test_read_report_lines_keeps_file_order() {
        let tmp = report_file("16bb\tReads having 1 contacts\t5000\n16bb\tReads having 2 contacts\t2000\nnoise line here\n");
        let lines = read_report_lines(tmp.path(), &["16", "16bb"]).unwrap();

        assert_eq!(
            lines["16bb"],
            vec![
                "Reads having 1 contacts\t5000".to_string(),
                "Reads having 2 contacts\t2000".to_string()
            ]
        );
        // requested but unmatched keys are still present
        assert_eq!(lines["16"], Vec::<String>::new());
    }

    #[rstest]
    fn test_read_report_counts_takes_last_tab_field() {
        let tmp = report_file("11b\tfoo\tbar\t42\nother\tignored\t1\n11\taligned\t9000\n");
        let counts = read_report_counts(tmp.path(), &["11", "11b"]).unwrap();

        assert_eq!(counts["11b"], vec![42]);
        assert_eq!(counts["11"], vec![9000]);
    }

    #[rstest]
    fn test_malformed_count_is_an_error() {
        let tmp = report_file("11\taligned\tnot-a-number\n");
        assert!(read_report_counts(tmp.path(), &["11"]).is_err());
    }

    #[rstest]
    fn test_unrecognized_keys_are_dropped_silently() {
        let tmp = report_file("99\tsomething\t7\n11\taligned\t5\n");
        let counts = read_report_counts(tmp.path(), &["11"]).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["11"], vec![5]);
    }
}
