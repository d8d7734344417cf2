//! # Trictools: *<small>Analysis and plotting utilities for capture-based chromatin interaction pipelines.</small>*
//!
//! `trictools` is a rust crate that post-processes the tabular output of Tri-C / Capture-C style
//! pipelines: read-pair reports, binned interaction-count matrices, loop-caller and peak-caller
//! output. Each tool is a single-pass batch transform that emits either a normalized table or a
//! bar-chart figure. The tools are also callable as library functions.
//!
pub mod common;
pub mod contacts;
pub mod matrix;
pub mod readers;
pub mod report;
pub mod stats;
