use clap::{Arg, ArgAction, Command};

use crate::contacts::consts::CONTACTS_CMD;

pub fn create_contacts_cli() -> Command {
    Command::new(CONTACTS_CMD)
        .about("Sum region-pair contacts from binned Tri-C interaction matrices.")
        .arg(
            Arg::new("sampleinfo")
                .long("sampleinfo")
                .short('i')
                .num_args(1..)
                .required(true)
                .help("Sampleinfo file(s) with name, capture and genome columns"),
        )
        .arg(
            Arg::new("regions")
                .long("regions")
                .short('r')
                .required(true)
                .help("Tsv file with name, start and end of each region of interest"),
        )
        .arg(
            Arg::new("locus")
                .long("locus")
                .num_args(2)
                .required(true)
                .value_parser(clap::value_parser!(u64))
                .help("Start and end coordinate of the binned capture locus"),
        )
        .arg(
            Arg::new("capture")
                .long("capture")
                .required(true)
                .help("Capture region to select samples and the capture bin by"),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .required(true)
                .help("Genome assembly to select samples by"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .num_args(1..)
                .help("Sample-name prefix(es) to include, one total or one per sampleinfo file"),
        )
        .arg(
            Arg::new("regions1")
                .long("regions1")
                .num_args(1..)
                .required(true)
                .help("First set of region names, listed from smallest to highest position"),
        )
        .arg(
            Arg::new("regions2")
                .long("regions2")
                .num_args(1..)
                .required(true)
                .help("Second set of region names intersected with the first"),
        )
        .arg(
            Arg::new("self-interactions")
                .long("self-interactions")
                .action(ArgAction::SetTrue)
                .help("Keep pairs of a region with itself"),
        )
        .arg(
            Arg::new("no-bin-norm")
                .long("no-bin-norm")
                .action(ArgAction::SetTrue)
                .help("Report raw sums instead of normalizing by the bin-pair count"),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .default_value(".")
                .help("Directory holding the processed interaction matrices"),
        )
        .arg(
            Arg::new("mapq")
                .long("mapq")
                .default_value("")
                .help("Mapq tag embedded in the matrix file names, if any"),
        )
        .arg(
            Arg::new("binsize")
                .long("binsize")
                .value_parser(clap::value_parser!(u64))
                .help("Bin size of the matrices; defaults to 2000 for hg38 and 1000 otherwise"),
        )
        .arg(
            Arg::new("radius")
                .long("radius")
                .default_value("2")
                .value_parser(clap::value_parser!(usize))
                .help("Fixed half-window, in bins, applied to narrow regions"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("File to write the contact table to"),
        )
        .arg(
            Arg::new("plot")
                .long("plot")
                .help("Also render the grouped contact bar chart to this file"),
        )
}

pub mod handlers {
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use clap::ArgMatches;

    use crate::common::models::GenomicRegion;
    use crate::common::utils::write_dataframe_tsv;
    use crate::contacts::plot::plot_contacts;
    use crate::contacts::{ContactOptions, contact_sums, to_dataframe};

    pub fn run_contacts(matches: &ArgMatches) -> Result<()> {
        let locus: Vec<u64> = matches.get_many("locus").unwrap().copied().collect();
        let prefixes: Vec<String> = matches
            .get_many::<String>("prefix")
            .map(|values| values.cloned().collect())
            .unwrap_or_else(|| vec![String::new()]);

        let opts = ContactOptions {
            sampleinfo: matches
                .get_many::<String>("sampleinfo")
                .unwrap()
                .map(PathBuf::from)
                .collect(),
            prefixes,
            regions: matches.get_one::<String>("regions").map(PathBuf::from).unwrap(),
            locus: GenomicRegion::new(locus[0], locus[1]),
            capture: matches.get_one::<String>("capture").unwrap().clone(),
            genome: matches.get_one::<String>("genome").unwrap().clone(),
            regions1: matches.get_many::<String>("regions1").unwrap().cloned().collect(),
            regions2: matches.get_many::<String>("regions2").unwrap().cloned().collect(),
            self_interactions: matches.get_flag("self-interactions"),
            bin_norm: !matches.get_flag("no-bin-norm"),
            matrix_dir: matches.get_one::<String>("dir").map(PathBuf::from).unwrap(),
            mapq: matches.get_one::<String>("mapq").unwrap().clone(),
            binsize: matches.get_one::<u64>("binsize").copied(),
            radius: *matches.get_one::<usize>("radius").unwrap(),
        };

        let output = matches
            .get_one::<String>("output")
            .expect("An output path is required.");

        let records = contact_sums(&opts)?;
        log::info!("Computed {} contact sums", records.len());

        let mut df = to_dataframe(&records)?;
        write_dataframe_tsv(&mut df, Path::new(output))?;

        if let Some(plot) = matches.get_one::<String>("plot") {
            plot_contacts(&records, Path::new(plot))?;
        }

        Ok(())
    }
}
