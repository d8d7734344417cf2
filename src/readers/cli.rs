use clap::{Arg, ArgAction, Command, arg};

use crate::readers::consts::{LOOPS_CMD, PEAKS_CMD};

pub fn create_loops_cli() -> Command {
    Command::new(LOOPS_CMD)
        .about("Normalize mustache loop-caller output into a canonical tsv.")
        .arg(Arg::new("input").help("Path to the mustache loops file").required(true))
        .arg(
            Arg::new("fdr")
                .long("fdr")
                .value_parser(clap::value_parser!(f64))
                .help("Keep only loops with FDR at or below this value"),
        )
        .arg(arg!(--output <output>).short('o').required(true))
}

pub fn create_peaks_cli() -> Command {
    Command::new(PEAKS_CMD)
        .about("Normalize MACS2 peak-caller output into a canonical tsv.")
        .arg(Arg::new("input").help("Path to the MACS2 .xls peaks file").required(true))
        .arg(
            Arg::new("full")
                .long("full")
                .action(ArgAction::SetTrue)
                .help("Keep every column instead of only chrom/start/end"),
        )
        .arg(
            Arg::new("keep-nonstandard")
                .long("keep-nonstandard")
                .action(ArgAction::SetTrue)
                .help("Keep scaffold and patch chromosomes such as chr1_random"),
        )
        .arg(arg!(--output <output>).short('o').required(true))
}

pub mod handlers {
    use std::path::Path;

    use anyhow::Result;
    use clap::ArgMatches;

    use crate::common::utils::write_dataframe_tsv;
    use crate::readers::{read_macs2_peaks, read_mustache_loops};

    pub fn run_loops(matches: &ArgMatches) -> Result<()> {
        let input = matches
            .get_one::<String>("input")
            .expect("A path to a loops file is required.");
        let output = matches
            .get_one::<String>("output")
            .expect("An output path is required.");
        let fdr = matches.get_one::<f64>("fdr").copied();

        let mut df = read_mustache_loops(Path::new(input), fdr)?;
        log::info!("Read {} loops from {}", df.height(), input);

        write_dataframe_tsv(&mut df, Path::new(output))
    }

    pub fn run_peaks(matches: &ArgMatches) -> Result<()> {
        let input = matches
            .get_one::<String>("input")
            .expect("A path to a peaks file is required.");
        let output = matches
            .get_one::<String>("output")
            .expect("An output path is required.");
        let bed_only = !matches.get_flag("full");
        let drop_nonstandard = !matches.get_flag("keep-nonstandard");

        let mut df = read_macs2_peaks(Path::new(input), bed_only, drop_nonstandard)?;
        log::info!("Read {} peaks from {}", df.height(), input);

        write_dataframe_tsv(&mut df, Path::new(output))
    }
}
