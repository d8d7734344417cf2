use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::readers::consts::{
    DETECTION_SCALE_COLUMN, DISTANCE_COLUMN, FDR_COLUMN, LOOP_COLUMN_RENAMES,
};

///
/// Read a loop file produced by the mustache loop caller into a dataframe with
/// columns `chrom1 | start1 | end1 | chrom2 | start2 | end2 | FDR | distance`.
///
/// # Arguments
///
/// - path: path to the mustache loops file (.tsv)
/// - fdr_filter: when given, keep only loops with `FDR <= fdr_filter`
///
pub fn read_mustache_loops(path: &Path, fdr_filter: Option<f64>) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|parse_options| parse_options.with_separator(b'\t'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open loops file: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to parse loops file: {:?}", path))?;

    if let Some(fdr) = fdr_filter {
        let mask = df
            .column(FDR_COLUMN)?
            .as_materialized_series()
            .f64()?
            .lt_eq(fdr);
        df = df.filter(&mask)?;
    }

    df = df.drop(DETECTION_SCALE_COLUMN)?;
    for (from, to) in LOOP_COLUMN_RENAMES {
        df.rename(from, to.into())?;
    }

    let start1 = df.column("start1")?.as_materialized_series().i64()?;
    let start2 = df.column("start2")?.as_materialized_series().i64()?;
    let distance: Int64Chunked = start2
        .into_iter()
        .zip(start1)
        .map(|(b, a)| match (b, a) {
            (Some(b), Some(a)) => Some((b - a).abs()),
            _ => None,
        })
        .collect();

    let mut distance = distance.into_series();
    distance.rename(DISTANCE_COLUMN.into());
    df.with_column(distance)?;

    Ok(df)
}
