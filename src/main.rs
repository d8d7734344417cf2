use anyhow::Result;
use clap::Command;
// go through the library crate to get the interfaces
use trictools::contacts;
use trictools::readers;
use trictools::stats;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
    pub const BIN_NAME: &str = env!("CARGO_PKG_NAME");
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Analysis and plotting utilities for capture-based chromatin interaction (Tri-C) sequencing pipelines.")
        .subcommand_required(true)
        .subcommand(stats::cli::create_stats_cli())
        .subcommand(contacts::cli::create_contacts_cli())
        .subcommand(readers::cli::create_loops_cli())
        .subcommand(readers::cli::create_peaks_cli())
}

fn main() -> Result<()> {
    env_logger::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        Some((stats::consts::STATS_CMD, matches)) => {
            stats::cli::handlers::run_stats(matches)?;
        }
        Some((contacts::consts::CONTACTS_CMD, matches)) => {
            contacts::cli::handlers::run_contacts(matches)?;
        }
        Some((readers::consts::LOOPS_CMD, matches)) => {
            readers::cli::handlers::run_loops(matches)?;
        }
        Some((readers::consts::PEAKS_CMD, matches)) => {
            readers::cli::handlers::run_peaks(matches)?;
        }
        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
