use clap::{Arg, Command};

use crate::stats::consts::STATS_CMD;

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .about("Summarize per-sample read-processing reports into a two-panel bar-chart figure.")
        .arg(
            Arg::new("combined")
                .long("combined")
                .num_args(1..)
                .required(true)
                .help("Full combined report files, one per sample"),
        )
        .arg(
            Arg::new("flashed")
                .long("flashed")
                .num_args(1..)
                .required(true)
                .help("Full report files for flashed reads, one per sample"),
        )
        .arg(
            Arg::new("nonflashed")
                .long("nonflashed")
                .num_args(1..)
                .required(true)
                .help("Full report files for non-flashed reads, one per sample"),
        )
        .arg(
            Arg::new("readnum")
                .long("readnum")
                .num_args(1..)
                .required(true)
                .value_parser(clap::value_parser!(u64))
                .help("Total number of read pairs, one per sample"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .short('s')
                .num_args(1..)
                .required(true)
                .help("Sample names matching the input files"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("File to save the figure to"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .help("Also write the computed statistics as a tsv"),
        )
}

pub mod handlers {
    use std::path::Path;

    use anyhow::{Result, bail};
    use clap::ArgMatches;

    use crate::stats::plot::plot_stats;
    use crate::stats::{SampleStats, collect_sample_stats, write_stats_table};

    pub fn run_stats(matches: &ArgMatches) -> Result<()> {
        let combined: Vec<&String> = matches.get_many("combined").unwrap().collect();
        let flashed: Vec<&String> = matches.get_many("flashed").unwrap().collect();
        let nonflashed: Vec<&String> = matches.get_many("nonflashed").unwrap().collect();
        let readnums: Vec<u64> = matches.get_many("readnum").unwrap().copied().collect();
        let samples: Vec<&String> = matches.get_many("samples").unwrap().collect();
        let output = matches
            .get_one::<String>("output")
            .expect("An output path is required.");
        let table = matches.get_one::<String>("table");

        let n = combined.len();
        if flashed.len() != n || nonflashed.len() != n || readnums.len() != n || samples.len() != n
        {
            bail!(
                "All per-sample inputs must have the same number of arguments: \
                 {} combined, {} flashed, {} nonflashed, {} read counts, {} samples",
                n,
                flashed.len(),
                nonflashed.len(),
                readnums.len(),
                samples.len()
            );
        }

        let mut stats: Vec<SampleStats> = Vec::with_capacity(n);
        for i in 0..n {
            log::info!("Collecting report statistics for sample {}", samples[i]);
            stats.push(collect_sample_stats(
                samples[i],
                Path::new(flashed[i]),
                Path::new(nonflashed[i]),
                Path::new(combined[i]),
                readnums[i],
            )?);
        }

        if let Some(table) = table {
            write_stats_table(&stats, Path::new(table))?;
        }

        plot_stats(&stats, Path::new(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn test_mismatched_input_lists_fail_before_reading() {
        // two combined reports but only one flashed report; none of the
        // paths exist, so reaching any file would be a different error
        let matches = create_stats_cli()
            .try_get_matches_from([
                "stats",
                "--combined", "a_combined.txt", "b_combined.txt",
                "--flashed", "a_flashed.txt",
                "--nonflashed", "a_nonflashed.txt", "b_nonflashed.txt",
                "--readnum", "1000", "2000",
                "--samples", "a", "b",
                "-o", "stats.png",
            ])
            .unwrap();

        let err = handlers::run_stats(&matches).unwrap_err();
        assert!(err.to_string().contains("same number of arguments"));
    }
}
