//! Data ingestion layer for expsize.
//!
//! Decodes the compressed inventory dump, parses each line into an
//! observation, applies the date window and aggregates per-object size
//! statistics in a single streaming pass.

pub mod aggregator;
pub mod analysis;
pub mod decoder;
pub mod filter;
pub mod reader;

pub use expsize_core as core;
