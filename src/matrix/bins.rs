///
/// Map a genomic coordinate to its bin index inside a fixed-resolution region.
///
/// Bin edges run `left_bound, left_bound + binsize, ...` strictly below
/// `right_bound`. The returned index is the number of edges strictly less than
/// `site`, so a site sitting exactly on an edge belongs to the bin starting at
/// that edge. Sites before the first edge or after the last edge have no bin.
///
/// # Arguments
///
/// - site: coordinate to map
/// - left_bound / right_bound: bounds of the binned region, `left_bound < right_bound`
/// - binsize: bin width, must be positive
///
pub fn bin_index(site: u64, left_bound: u64, right_bound: u64, binsize: u64) -> Option<usize> {
    assert!(binsize > 0, "binsize must be positive");
    assert!(
        left_bound < right_bound,
        "left bound must be below right bound"
    );

    let n_edges = (right_bound - left_bound).div_ceil(binsize);
    let last_edge = left_bound + (n_edges - 1) * binsize;

    if site < left_bound || site > last_edge {
        return None;
    }

    if site == left_bound {
        Some(0)
    } else {
        // edges strictly below site
        Some((((site - left_bound - 1) / binsize) + 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    // edges at 0, 2, 4, 6, 8; three edges below 5
    #[case(5, 0, 10, 2, Some(3))]
    // a site on an edge belongs to the bin starting there
    #[case(4, 0, 10, 2, Some(2))]
    #[case(0, 0, 10, 2, Some(0))]
    // the last edge is still mappable
    #[case(8, 0, 10, 2, Some(4))]
    // outside the edge span
    #[case(9, 0, 10, 2, None)]
    #[case(11, 0, 10, 2, None)]
    fn test_bin_index(
        #[case] site: u64,
        #[case] left: u64,
        #[case] right: u64,
        #[case] binsize: u64,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(bin_index(site, left, right, binsize), expected);
    }

    #[rstest]
    fn test_bin_index_out_of_bounds_below() {
        assert_eq!(bin_index(50, 100, 1000, 100), None);
    }

    #[rstest]
    fn test_bin_index_brackets_site() {
        // for an in-range site k satisfies left + k*binsize <= site < left + (k+1)*binsize
        // except on exact edges, where strict counting picks the bin starting at the edge
        let (left, right, binsize) = (1000u64, 9000u64, 500u64);
        for site in (1001..8500).step_by(7) {
            let k = bin_index(site, left, right, binsize).unwrap() as u64;
            if (site - left) % binsize == 0 {
                assert_eq!(site, left + k * binsize);
            } else {
                assert!(left + (k - 1) * binsize <= site && site < left + k * binsize);
            }
        }
    }
}
