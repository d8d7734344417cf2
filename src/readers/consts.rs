pub const LOOPS_CMD: &str = "loops";
pub const PEAKS_CMD: &str = "peaks";

/// Column renames applied to mustache loop files, in file order.
pub const LOOP_COLUMN_RENAMES: [(&str, &str); 6] = [
    ("BIN1_CHR", "chrom1"),
    ("BIN1_START", "start1"),
    ("BIN1_END", "end1"),
    ("BIN2_CHROMOSOME", "chrom2"),
    ("BIN2_START", "start2"),
    ("BIN2_END", "end2"),
];

pub const DETECTION_SCALE_COLUMN: &str = "DETECTION_SCALE";
pub const FDR_COLUMN: &str = "FDR";
pub const DISTANCE_COLUMN: &str = "distance";

pub const CHROM_COLUMN: &str = "chrom";
pub const BED_COLUMNS: [&str; 3] = ["chrom", "start", "end"];

/// Standard chromosome names contain this...
pub const STANDARD_CHROM_MARKER: &str = "chr";
/// ...and scaffolds/patches additionally contain this.
pub const NONSTANDARD_CHROM_MARKER: char = '_';
