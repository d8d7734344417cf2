pub const GZ_FILE_EXTENSION: &str = "gz";
pub const SVG_FILE_EXTENSION: &str = "svg";
