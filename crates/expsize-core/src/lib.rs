//! Core types for expsize.
//!
//! Holds the observation and statistics model, the error taxonomy, CLI
//! settings with their validated run configuration, and date helpers shared
//! by the data and report layers.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;
