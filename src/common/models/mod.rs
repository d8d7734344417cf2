pub mod region;
pub mod sample;

pub use region::{GenomicRegion, RegionTable};
pub use sample::{NamingScheme, SampleInfo, SampleMeta, load_sample_names};
