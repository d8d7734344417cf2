pub const CONTACTS_CMD: &str = "contacts";

/// Narrow regions are widened to a window of `2 * radius + 1` bins.
pub const DEFAULT_RADIUS: usize = 2;

pub const DEFAULT_BINSIZE: u64 = 1000;
pub const HG38_BINSIZE: u64 = 2000;
pub const HG38_GENOME: &str = "hg38";

/// Bin size used for a genome when none is given explicitly. The hg38 pipeline
/// bins at 2 kb, every other assembly at 1 kb.
pub fn binsize_for_genome(genome: &str) -> u64 {
    if genome == HG38_GENOME {
        HG38_BINSIZE
    } else {
        DEFAULT_BINSIZE
    }
}

/// File name of a pipeline matrix under the matrix directory.
pub fn matrix_file_name(sample: &str, mapq: &str, binsize: u64) -> String {
    format!("{}{}_TriC_interactions_{}_RAW.tab", sample, mapq, binsize)
}
