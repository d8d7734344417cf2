//!
//! # Binned interaction-count matrices
//! Loading of the square, tab-delimited contact matrices produced by the Tri-C
//! pipeline, bin-index lookups inside the capture locus, and summation of the
//! sub-matrix block spanned by a pair of regions of interest.
//!
pub mod bins;

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array2, s};
use thiserror::Error;

use crate::common::models::GenomicRegion;
use crate::common::utils::get_dynamic_reader;

pub use bins::bin_index;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Coordinate {site} has no bin in {left}-{right} at binsize {binsize}")]
    SiteOutOfBounds {
        site: u64,
        left: u64,
        right: u64,
        binsize: u64,
    },

    #[error("Window of radius {radius} around bin {midbin} extends below bin 0")]
    WindowUnderflow { midbin: usize, radius: usize },

    #[error("Interaction matrix is not square: {rows} rows, {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A half-open range of bin indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub start: usize,
    pub end: usize,
}

impl BinRange {
    pub fn new(start: usize, end: usize) -> Self {
        BinRange { start, end }
    }

    pub fn n_bins(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// The summed block for a region pair, along with the bin ranges that were
/// actually used, so callers can normalize by the bin-pair count.
#[derive(Debug, Clone, Copy)]
pub struct ContactSum {
    pub sum: f64,
    pub range1: BinRange,
    pub range2: BinRange,
}

///
/// A square matrix of contact counts at a fixed bin size. Bin `i` covers the
/// half-open interval `[left + i*binsize, left + (i+1)*binsize)` of the locus.
///
pub struct InteractionMatrix {
    pub counts: Array2<f64>,
}

impl InteractionMatrix {
    ///
    /// Load a whitespace/tab-delimited square matrix of floats, gzipped or not.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;

        let mut values: Vec<f64> = Vec::new();
        let mut n_cols: Option<usize> = None;
        let mut n_rows = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("There was an error reading line {} of {:?}", index + 1, path))?;
            if line.trim().is_empty() {
                continue;
            }

            let mut row_len = 0;
            for token in line.split(['\t', ' ']).filter(|t| !t.is_empty()) {
                let value: f64 = token.parse().with_context(|| {
                    format!("Invalid matrix entry {:?} on line {} of {:?}", token, index + 1, path)
                })?;
                values.push(value);
                row_len += 1;
            }

            let expected = *n_cols.get_or_insert(row_len);
            if row_len != expected {
                return Err(MatrixError::RaggedRow {
                    row: index + 1,
                    found: row_len,
                    expected,
                }
                .into());
            }
            n_rows += 1;
        }

        let n_cols = n_cols.unwrap_or(0);
        if n_rows != n_cols {
            return Err(MatrixError::NotSquare {
                rows: n_rows,
                cols: n_cols,
            }
            .into());
        }

        let counts = Array2::from_shape_vec((n_rows, n_cols), values)
            .with_context(|| format!("Failed to shape matrix from {:?}", path))?;

        Ok(InteractionMatrix { counts })
    }

    pub fn n_bins(&self) -> usize {
        self.counts.nrows()
    }

    /// Zero the capture bin's row and column so self-contacts of the capture
    /// site do not dominate the counts.
    pub fn zero_capture_bin(&mut self, bin: usize) {
        self.counts.row_mut(bin).fill(0.0);
        self.counts.column_mut(bin).fill(0.0);
    }
}

///
/// Resolve a region of interest to the half-open range of bins it covers within
/// the locus.
///
/// When `radius > 0` and the region is narrower than `binsize * (2*radius + 1)`,
/// the range becomes a fixed window of `2*radius + 1` bins centered on the bin
/// containing the region midpoint, so narrow regions are not under-sampled.
///
pub fn resolve_bin_range(
    region: &GenomicRegion,
    locus: &GenomicRegion,
    binsize: u64,
    radius: usize,
) -> Result<BinRange, MatrixError> {
    let lookup = |site: u64| {
        bin_index(site, locus.start, locus.end, binsize).ok_or(MatrixError::SiteOutOfBounds {
            site,
            left: locus.start,
            right: locus.end,
            binsize,
        })
    };

    if radius > 0 && region.width() < binsize * (2 * radius as u64 + 1) {
        let midbin = lookup(region.midpoint())?;
        let start = midbin
            .checked_sub(radius)
            .ok_or(MatrixError::WindowUnderflow { midbin, radius })?;
        Ok(BinRange::new(start, midbin + radius + 1))
    } else {
        Ok(BinRange::new(lookup(region.start)?, lookup(region.end)?))
    }
}

///
/// Sum the matrix block spanned by a pair of regions: rows from the first
/// region's bins, columns from the second region's. Ranges running past the
/// matrix edge are clamped, as a direct slice would be.
///
pub fn sum_contacts(
    m: &Array2<f64>,
    region1: &GenomicRegion,
    region2: &GenomicRegion,
    locus: &GenomicRegion,
    binsize: u64,
    radius: usize,
) -> Result<ContactSum, MatrixError> {
    let range1 = resolve_bin_range(region1, locus, binsize, radius)?;
    let range2 = resolve_bin_range(region2, locus, binsize, radius)?;

    let (rows, cols) = m.dim();
    let r1_end = range1.end.min(rows);
    let r1_start = range1.start.min(r1_end);
    let r2_end = range2.end.min(cols);
    let r2_start = range2.start.min(r2_end);

    let sum = m.slice(s![r1_start..r1_end, r2_start..r2_end]).sum();

    Ok(ContactSum { sum, range1, range2 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn locus() -> GenomicRegion {
        GenomicRegion::new(0, 10_000)
    }

    fn ones(n: usize) -> Array2<f64> {
        Array2::from_elem((n, n), 1.0)
    }

    #[rstest]
    fn test_wide_region_uses_its_own_extent(locus: GenomicRegion) {
        // width 6000 >= binsize * (2*2 + 1) = 5000, so no window override
        let region = GenomicRegion::new(2000, 8000);
        let range = resolve_bin_range(&region, &locus, 1000, 2).unwrap();
        assert_eq!(range, BinRange::new(2, 8));
    }

    #[rstest]
    fn test_narrow_region_gets_fixed_window(locus: GenomicRegion) {
        let region = GenomicRegion::new(2000, 4000);
        let range = resolve_bin_range(&region, &locus, 1000, 2).unwrap();
        // midpoint 3000 maps to bin 3; window is [1, 6) = five bins
        assert_eq!(range, BinRange::new(1, 6));
        assert_eq!(range.n_bins(), 5);
    }

    #[rstest]
    fn test_zero_radius_disables_window(locus: GenomicRegion) {
        let region = GenomicRegion::new(2000, 4000);
        let range = resolve_bin_range(&region, &locus, 1000, 0).unwrap();
        assert_eq!(range, BinRange::new(2, 4));
    }

    #[rstest]
    fn test_window_underflow_is_an_error(locus: GenomicRegion) {
        // midpoint in bin 1, radius 2 would start the window at bin -1
        let region = GenomicRegion::new(900, 1100);
        let err = resolve_bin_range(&region, &locus, 1000, 2).unwrap_err();
        assert!(matches!(err, MatrixError::WindowUnderflow { .. }));
    }

    #[rstest]
    fn test_out_of_locus_site_is_an_error(locus: GenomicRegion) {
        let region = GenomicRegion::new(9500, 12_000);
        let err = resolve_bin_range(&region, &locus, 1000, 0).unwrap_err();
        assert!(matches!(err, MatrixError::SiteOutOfBounds { .. }));
    }

    #[rstest]
    fn test_sum_matches_direct_slice(locus: GenomicRegion) {
        let mut m = ones(10);
        m[[2, 6]] = 5.0;

        let region1 = GenomicRegion::new(2000, 8000);
        let region2 = GenomicRegion::new(2000, 8000);
        let contact = sum_contacts(&m, &region1, &region2, &locus, 1000, 0).unwrap();

        let direct = m.slice(s![2..8, 2..8]).sum();
        assert_eq!(contact.sum, direct);
        assert_eq!(contact.sum, 40.0);
    }

    #[rstest]
    fn test_sum_clamps_past_matrix_edge(locus: GenomicRegion) {
        let m = ones(8);

        // bins 7..9 on a matrix with only 8 columns: the trailing column vanishes
        let region1 = GenomicRegion::new(2000, 8000);
        let region2 = GenomicRegion::new(7000, 9000);
        let contact = sum_contacts(&m, &region1, &region2, &locus, 1000, 0).unwrap();

        assert_eq!(contact.range2, BinRange::new(7, 9));
        assert_eq!(contact.sum, 6.0);
    }

    #[rstest]
    fn test_zero_capture_bin() {
        let mut matrix = InteractionMatrix { counts: ones(4) };
        matrix.zero_capture_bin(1);

        assert_eq!(matrix.counts.row(1).sum(), 0.0);
        assert_eq!(matrix.counts.column(1).sum(), 0.0);
        assert_eq!(matrix.counts.sum(), 9.0);
    }
}
