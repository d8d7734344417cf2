use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

///
/// One row of a sampleinfo file: a headerless tsv with
/// `name <tab> capture <tab> genome` per sample.
///
#[derive(Debug, Clone, Deserialize)]
pub struct SampleInfo {
    pub name: String,
    pub capture: String,
    pub genome: String,
}

impl SampleInfo {
    pub fn from_file(path: &Path) -> Result<Vec<Self>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open sampleinfo file: {:?}", path))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_reader(file);

        let mut samples = Vec::new();
        for (index, record) in reader.deserialize().enumerate() {
            let sample: SampleInfo = record.with_context(|| {
                format!("Failed to parse sampleinfo row {} in {:?}", index + 1, path)
            })?;
            samples.push(sample);
        }

        Ok(samples)
    }
}

/// The naming convention a sample name follows. Detected from the name's tail,
/// one scheme per historical batch of runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// `{base}_{rep}_{time}h`, e.g. `WT_1_0h` or `WT_2_24h`. Treatment time has one
    /// digit when it is 0 or 8, two digits otherwise.
    HourSuffix,
    /// Pooled replicates, e.g. `{base}_{time}_1+3`. The replicate is reported as 1.
    PooledPlus,
    /// Canonical `{base}_{time}_{rep}`; the base may itself contain underscores.
    Underscore,
}

impl NamingScheme {
    pub fn detect(name: &str) -> NamingScheme {
        let bytes = name.as_bytes();
        if bytes.last() == Some(&b'h') {
            NamingScheme::HourSuffix
        } else if bytes.len() >= 2 && bytes[bytes.len() - 2] == b'+' {
            NamingScheme::PooledPlus
        } else {
            NamingScheme::Underscore
        }
    }
}

///
/// Sample metadata recovered from a sample name: base name, replicate number and
/// treatment time. Replicate and time stay strings since not every scheme yields
/// clean integers.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMeta {
    pub base: String,
    pub replicate: String,
    pub time: String,
}

impl SampleMeta {
    /// Parse a sample name under its auto-detected [NamingScheme].
    ///
    /// Sample names are plain ASCII by convention; a name too short for its
    /// detected scheme is an error rather than a truncated guess.
    pub fn parse(name: &str) -> Result<Self> {
        if !name.is_ascii() {
            bail!("Sample name {:?} contains non-ASCII characters", name);
        }

        match NamingScheme::detect(name) {
            NamingScheme::HourSuffix => Self::parse_hour_suffix(name),
            NamingScheme::PooledPlus => Self::parse_pooled_plus(name),
            NamingScheme::Underscore => Self::parse_underscore(name),
        }
    }

    fn parse_hour_suffix(name: &str) -> Result<Self> {
        let bytes = name.as_bytes();
        let n = bytes.len();

        // one-digit times are 0h and 8h, everything else has two digits
        let single_digit = n >= 2 && (bytes[n - 2] == b'0' || bytes[n - 2] == b'8');
        let meta_len = if single_digit { 5 } else { 6 };
        if n < meta_len {
            bail!("Sample name {:?} is too short for the hour-suffix scheme", name);
        }

        let (rep_at, time) = if single_digit {
            (n - 4, &name[n - 2..n - 1])
        } else {
            (n - 5, &name[n - 3..n - 1])
        };

        Ok(SampleMeta {
            base: name[..n - meta_len].to_string(),
            replicate: name[rep_at..rep_at + 1].to_string(),
            time: time.to_string(),
        })
    }

    fn parse_pooled_plus(name: &str) -> Result<Self> {
        let n = name.len();
        if n < 7 {
            bail!("Sample name {:?} is too short for the pooled-replicate scheme", name);
        }

        Ok(SampleMeta {
            base: name[..n - 7].to_string(),
            replicate: "1".to_string(),
            time: name[n - 6..n - 4].to_string(),
        })
    }

    fn parse_underscore(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split('_').collect();
        if parts.len() < 3 {
            bail!(
                "Sample name {:?} does not follow the {{base}}_{{time}}_{{rep}} scheme",
                name
            );
        }

        Ok(SampleMeta {
            base: parts[..parts.len() - 2].join("_"),
            replicate: parts[parts.len() - 1].to_string(),
            time: parts[parts.len() - 2].to_string(),
        })
    }
}

///
/// Read one or more sampleinfo files and keep the names matching the requested
/// capture, genome, and per-file name prefix.
///
/// The prefix list must either hold a single prefix applied to every file or
/// exactly one prefix per file.
///
pub fn load_sample_names(
    paths: &[impl AsRef<Path>],
    prefixes: &[String],
    capture: &str,
    genome: &str,
) -> Result<Vec<String>> {
    if prefixes.len() > 1 && prefixes.len() != paths.len() {
        bail!(
            "Got {} sampleinfo files but {} prefixes; pass one prefix total or one per file",
            paths.len(),
            prefixes.len()
        );
    }

    let mut names = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let prefix = if prefixes.len() > 1 {
            prefixes[i].as_str()
        } else {
            prefixes.first().map(String::as_str).unwrap_or("")
        };

        for sample in SampleInfo::from_file(path.as_ref())? {
            if sample.capture == capture
                && sample.genome == genome
                && sample.name.contains(prefix)
            {
                names.push(sample.name);
            }
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sampleinfo_file(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp
    }

    #[rstest]
    #[case("WT_1_0h", "WT", "1", "0")]
    #[case("WT_2_24h", "WT", "2", "24")]
    #[case("dTAG_v2_1_24h", "dTAG_v2", "1", "24")]
    fn test_hour_suffix_scheme(
        #[case] name: &str,
        #[case] base: &str,
        #[case] replicate: &str,
        #[case] time: &str,
    ) {
        assert_eq!(NamingScheme::detect(name), NamingScheme::HourSuffix);
        let meta = SampleMeta::parse(name).unwrap();
        assert_eq!(meta.base, base);
        assert_eq!(meta.replicate, replicate);
        assert_eq!(meta.time, time);
    }

    #[rstest]
    fn test_pooled_plus_scheme() {
        let name = "KO_d0_1+3";
        assert_eq!(NamingScheme::detect(name), NamingScheme::PooledPlus);
        let meta = SampleMeta::parse(name).unwrap();
        assert_eq!(meta.base, "KO");
        assert_eq!(meta.replicate, "1");
        assert_eq!(meta.time, "d0");
    }

    #[rstest]
    #[case("WT_0_1", "WT", "1", "0")]
    #[case("my_line_d4_2", "my_line", "2", "d4")]
    fn test_underscore_scheme(
        #[case] name: &str,
        #[case] base: &str,
        #[case] replicate: &str,
        #[case] time: &str,
    ) {
        assert_eq!(NamingScheme::detect(name), NamingScheme::Underscore);
        let meta = SampleMeta::parse(name).unwrap();
        assert_eq!(meta.base, base);
        assert_eq!(meta.replicate, replicate);
        assert_eq!(meta.time, time);
    }

    #[rstest]
    #[case("x")]
    #[case("h")]
    #[case("a+b")]
    fn test_too_short_name_is_an_error(#[case] name: &str) {
        assert!(SampleMeta::parse(name).is_err());
    }

    #[rstest]
    fn test_prefix_count_must_match_file_count() {
        let a = sampleinfo_file("WT_0_1\tcap\tmm39\n");
        let b = sampleinfo_file("KO_0_1\tcap\tmm39\n");

        let prefixes = vec!["WT".to_string(), "KO".to_string(), "XX".to_string()];
        let err = load_sample_names(&[a.path(), b.path()], &prefixes, "cap", "mm39").unwrap_err();
        assert!(err.to_string().contains("one prefix total or one per file"));
    }

    #[rstest]
    fn test_per_file_prefixes_filter_independently() {
        let a = sampleinfo_file("WT_0_1\tcap\tmm39\nKO_0_1\tcap\tmm39\n");
        let b = sampleinfo_file("WT_0_2\tcap\tmm39\nKO_0_2\tcap\tmm39\n");

        let prefixes = vec!["WT".to_string(), "KO".to_string()];
        let names = load_sample_names(&[a.path(), b.path()], &prefixes, "cap", "mm39").unwrap();
        assert_eq!(names, vec!["WT_0_1".to_string(), "KO_0_2".to_string()]);
    }

    #[rstest]
    fn test_single_prefix_applies_to_every_file() {
        let a = sampleinfo_file("WT_0_1\tcap\tmm39\nKO_0_1\tcap\tmm39\n");
        let b = sampleinfo_file("WT_0_2\tcap\tmm39\n");

        let prefixes = vec!["WT".to_string()];
        let names = load_sample_names(&[a.path(), b.path()], &prefixes, "cap", "mm39").unwrap();
        assert_eq!(names, vec!["WT_0_1".to_string(), "WT_0_2".to_string()]);
    }
}
