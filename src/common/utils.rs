use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::common::consts::GZ_FILE_EXTENSION;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new(GZ_FILE_EXTENSION));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Write a dataframe as a tab-separated file with a header row.
///
pub fn write_dataframe_tsv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    CsvWriter::new(&mut file)
        .with_separator(b'\t')
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write table to {:?}", path))?;

    Ok(())
}
