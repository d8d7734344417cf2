//!
//! # Region-pair contact sums
//! For every selected sample and every pair of regions of interest, sum the
//! interaction-matrix block the pair spans and normalize by the number of bin
//! pairs, producing one `pinteractions` value per sample and region pair.
//!
pub mod cli;
pub mod consts;
pub mod plot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;

use crate::common::models::{GenomicRegion, RegionTable, SampleMeta, load_sample_names};
use crate::matrix::{InteractionMatrix, bin_index, sum_contacts};
use consts::{binsize_for_genome, matrix_file_name};

///
/// Everything the contact-sum run needs, resolved from the CLI.
///
pub struct ContactOptions {
    pub sampleinfo: Vec<PathBuf>,
    pub prefixes: Vec<String>,
    pub regions: PathBuf,
    pub locus: GenomicRegion,
    pub capture: String,
    pub genome: String,
    pub regions1: Vec<String>,
    pub regions2: Vec<String>,
    pub self_interactions: bool,
    pub bin_norm: bool,
    pub matrix_dir: PathBuf,
    pub mapq: String,
    pub binsize: Option<u64>,
    pub radius: usize,
}

impl ContactOptions {
    pub fn binsize(&self) -> u64 {
        self.binsize.unwrap_or_else(|| binsize_for_genome(&self.genome))
    }
}

/// One normalized contact value for a sample and a region pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub sample: String,
    pub replicate: String,
    pub time: String,
    pub region1: String,
    pub region2: String,
    pub pinteractions: f64,
}

impl ContactRecord {
    pub fn region_pair(&self) -> String {
        format!("{} - {}", self.region1, self.region2)
    }
}

///
/// Run the contact-sum pipeline: select samples, load and mask their matrices,
/// and sum the block for every requested region pair.
///
pub fn contact_sums(opts: &ContactOptions) -> Result<Vec<ContactRecord>> {
    let binsize = opts.binsize();
    let regions = RegionTable::from_file(&opts.regions)?;

    let samples = load_sample_names(&opts.sampleinfo, &opts.prefixes, &opts.capture, &opts.genome)?;
    if samples.is_empty() {
        anyhow::bail!(
            "No samples matched capture {:?} and genome {:?}",
            opts.capture,
            opts.genome
        );
    }
    log::info!("Selected {} samples", samples.len());

    let capture_region = regions.require(&opts.capture)?;
    let capture_bin = bin_index(capture_region.start, opts.locus.start, opts.locus.end, binsize)
        .with_context(|| {
            format!(
                "Capture start {} falls outside the locus {}-{}",
                capture_region.start, opts.locus.start, opts.locus.end
            )
        })?;

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples ({eta})")?
            .progress_chars("##-"),
    );

    let mut records: Vec<ContactRecord> = Vec::new();
    for sample in &samples {
        let meta = SampleMeta::parse(sample)?;

        let path = opts.matrix_dir.join(matrix_file_name(sample, &opts.mapq, binsize));
        let mut matrix = InteractionMatrix::from_file(&path)?;
        matrix.zero_capture_bin(capture_bin);
        log::info!("Loaded {} bins from {:?}", matrix.n_bins(), path);

        for name1 in &opts.regions1 {
            for name2 in &opts.regions2 {
                let region1 = regions.require(name1)?;
                let region2 = regions.require(name2)?;

                if region1.start > region2.start {
                    log::warn!(
                        "Skipping {} - {}: the pair is not in coordinate order; \
                         switch their places to include it",
                        name1,
                        name2
                    );
                    continue;
                }

                let contact = sum_contacts(
                    &matrix.counts,
                    region1,
                    region2,
                    &opts.locus,
                    binsize,
                    opts.radius,
                )?;

                let pinteractions = if opts.bin_norm {
                    let square_bins = contact.range1.n_bins() * contact.range2.n_bins();
                    contact.sum / square_bins as f64
                } else {
                    contact.sum
                };

                records.push(ContactRecord {
                    sample: meta.base.clone(),
                    replicate: meta.replicate.clone(),
                    time: meta.time.clone(),
                    region1: name1.clone(),
                    region2: name2.clone(),
                    pinteractions,
                });
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    if !opts.self_interactions {
        records.retain(|r| r.region1 != r.region2);
    }

    Ok(records)
}

///
/// Assemble the records into the output table, one row per sample and region
/// pair, with a combined `regioncomb` label column.
///
pub fn to_dataframe(records: &[ContactRecord]) -> Result<DataFrame> {
    let df = df!(
        "sample" => records.iter().map(|r| r.sample.clone()).collect::<Vec<_>>(),
        "replicate" => records.iter().map(|r| r.replicate.clone()).collect::<Vec<_>>(),
        "treatment_time" => records.iter().map(|r| r.time.clone()).collect::<Vec<_>>(),
        "region1" => records.iter().map(|r| r.region1.clone()).collect::<Vec<_>>(),
        "region2" => records.iter().map(|r| r.region2.clone()).collect::<Vec<_>>(),
        "pinteractions" => records.iter().map(|r| r.pinteractions).collect::<Vec<_>>(),
        "regioncomb" => records.iter().map(|r| r.region_pair()).collect::<Vec<_>>(),
    )?;

    Ok(df)
}
