//!
//! # Loop- and peak-caller importers
//! Normalize the tab-separated output of the mustache loop caller and the MACS2
//! peak caller into canonical dataframes.
//!
pub mod cli;
pub mod consts;
pub mod loops;
pub mod peaks;

pub use loops::read_mustache_loops;
pub use peaks::read_macs2_peaks;
