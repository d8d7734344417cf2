//!
//! # Common, core utilities for `trictools`
//! Shared models and helpers used by the individual tools: genomic regions, region tables,
//! sample metadata, and buffered readers for plain or gzipped input.
//!
pub mod consts;
pub mod models;
pub mod utils;
