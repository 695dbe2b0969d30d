use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::{ExpsizeError, Result};
use crate::models::{LinePolicy, MinPolicy, OutputMode, DEFAULT_KEY_PREFIX_LEN};
use crate::time_utils::parse_boundary_date;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Per-object size statistics from a compressed storage inventory dump
#[derive(Parser, Debug, Clone)]
#[command(
    name = "expsize",
    about = "Per-object size statistics from a compressed storage inventory dump",
    version
)]
pub struct Settings {
    /// XZ-compressed text dump of stored objects
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Ignore objects observed before this date (YYYY-MM-DD, inclusive bound)
    #[arg(long)]
    pub after: Option<String>,

    /// Ignore objects observed after this date (YYYY-MM-DD, inclusive bound)
    #[arg(long)]
    pub before: Option<String>,

    /// Report format
    #[arg(long, default_value = "text", value_parser = ["text", "yaml", "json"])]
    pub output: String,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Number of leading path characters removed to form the object key;
    /// paths no longer than this are rejected as malformed
    #[arg(long, default_value_t = DEFAULT_KEY_PREFIX_LEN)]
    pub prefix_len: usize,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Track the true minimum size, treating an observed zero as a real value
    #[arg(long)]
    pub exact_min: bool,

    /// Logging level
    #[arg(
        long,
        env = "EXPSIZE_LOG_LEVEL",
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── RunConfig ──────────────────────────────────────────────────────────────────

/// Validated configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: PathBuf,
    /// Inclusive lower bound on the observation date.
    pub after: Option<NaiveDate>,
    /// Inclusive upper bound on the observation date.
    pub before: Option<NaiveDate>,
    pub output_mode: OutputMode,
    /// `None` writes to stdout.
    pub output_file: Option<PathBuf>,
    pub key_prefix_len: usize,
    pub line_policy: LinePolicy,
    pub min_policy: MinPolicy,
}

impl Settings {
    /// Effective log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }

    /// Validate every flag into a [`RunConfig`].
    ///
    /// Runs before the source is opened, so a bad flag never costs a read.
    pub fn into_config(self) -> Result<RunConfig> {
        let after = non_empty(self.after.as_deref())
            .map(|v| parse_boundary_date("after", v))
            .transpose()?;
        let before = non_empty(self.before.as_deref())
            .map(|v| parse_boundary_date("before", v))
            .transpose()?;

        if self.prefix_len == 0 {
            return Err(ExpsizeError::Config(
                "--prefix-len must be at least 1".to_string(),
            ));
        }

        let output_mode = OutputMode::from_name(&self.output).ok_or_else(|| {
            ExpsizeError::Config(format!("unknown output format: {}", self.output))
        })?;

        Ok(RunConfig {
            source: self.file,
            after,
            before,
            output_mode,
            output_file: self.output_file,
            key_prefix_len: self.prefix_len,
            line_policy: if self.strict {
                LinePolicy::Strict
            } else {
                LinePolicy::Skip
            },
            min_policy: if self.exact_min {
                MinPolicy::Exact
            } else {
                MinPolicy::ZeroSentinel
            },
        })
    }
}

/// An empty flag value behaves like an absent one.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
