use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::readers::consts::{
    BED_COLUMNS, CHROM_COLUMN, NONSTANDARD_CHROM_MARKER, STANDARD_CHROM_MARKER,
};

///
/// Read the `.xls`-style peaks table produced by MACS2 into a dataframe.
///
/// # Arguments
///
/// - path: path to the MACS2 peaks file; `#` comment lines are skipped
/// - bed_only: keep only the `chrom | start | end` columns
/// - drop_nonstandard: drop scaffold/patch chromosomes, keeping rows whose
///   chromosome name contains `chr` and no underscore (`chr1` stays,
///   `chr1_random` goes)
///
pub fn read_macs2_peaks(path: &Path, bed_only: bool, drop_nonstandard: bool) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|parse_options| {
            parse_options
                .with_separator(b'\t')
                .with_comment_prefix(Some("#"))
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open peaks file: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to parse peaks file: {:?}", path))?;

    df.rename("chr", CHROM_COLUMN.into())?;

    if bed_only {
        df = df.select(BED_COLUMNS)?;
    }

    if drop_nonstandard {
        let chroms = df.column(CHROM_COLUMN)?.as_materialized_series().str()?;
        let mask: BooleanChunked = chroms
            .into_iter()
            .map(|chrom| {
                chrom.map(|c| {
                    c.contains(STANDARD_CHROM_MARKER) && !c.contains(NONSTANDARD_CHROM_MARKER)
                })
            })
            .collect();
        df = df.filter(&mask)?;
    }

    Ok(df)
}
