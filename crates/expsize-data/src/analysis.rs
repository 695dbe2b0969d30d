//! Streaming analysis pipeline.
//!
//! Decodes the dump, parses each line, applies the date window and folds the
//! surviving observations into a [`StatsAggregator`], in a single pass.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use expsize_core::error::{ExpsizeError, LineError, Result};
use expsize_core::models::{LinePolicy, MinPolicy};
use expsize_core::settings::RunConfig;
use tracing::{debug, info, warn};

use crate::aggregator::StatsAggregator;
use crate::decoder::{classify_read_error, open_source};
use crate::filter::DateFilter;
use crate::reader::{KeyRule, LineParser};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the pipeline needs besides the input itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub key_rule: KeyRule,
    pub filter: DateFilter,
    pub line_policy: LinePolicy,
    pub min_policy: MinPolicy,
}

impl AnalysisOptions {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            key_rule: KeyRule::PrefixLength(config.key_prefix_len),
            filter: DateFilter::new(config.after, config.before),
            line_policy: config.line_policy,
            min_policy: config.min_policy,
        }
    }
}

/// Counters gathered during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisMetadata {
    /// Lines read from the decoded stream, blank ones included.
    pub lines_read: u64,
    /// Blank or whitespace-only lines.
    pub blank_lines: u64,
    /// Well-formed lines dropped by the date window.
    pub lines_filtered: u64,
    /// Malformed lines skipped, keyed by [`LineError::kind`].
    pub skipped_by_kind: BTreeMap<&'static str, u64>,
    /// Observations folded into the aggregator.
    pub observations: u64,
    pub elapsed_seconds: f64,
}

impl AnalysisMetadata {
    pub fn lines_skipped(&self) -> u64 {
        self.skipped_by_kind.values().sum()
    }
}

/// The complete output of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub aggregator: StatsAggregator,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the pipeline over the XZ dump at `path`.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<AnalysisResult> {
    if options.filter.is_unbounded() {
        info!("Analysing {} (no date window)", path.display());
    } else {
        info!(
            "Analysing {} (after: {}, before: {})",
            path.display(),
            describe_bound(options.filter.after()),
            describe_bound(options.filter.before()),
        );
    }
    if let (Some(after), Some(before)) = (options.filter.after(), options.filter.before()) {
        if after > before {
            warn!(
                "--after {} is later than --before {}; every observation will be excluded",
                after, before
            );
        }
    }
    let reader = open_source(path)?;
    analyze_reader(reader, options)
}

/// Run the pipeline over an already-decoded line stream.
///
/// Read errors abort the run; integrity failures are reported as
/// [`ExpsizeError::CorruptInput`] with the number of the line being read.
pub fn analyze_reader<R: BufRead>(
    mut reader: R,
    options: &AnalysisOptions,
) -> Result<AnalysisResult> {
    let start = Instant::now();
    let parser = LineParser::new(options.key_rule);
    let mut aggregator = StatsAggregator::new(options.min_policy);
    let mut metadata = AnalysisMetadata::default();
    let mut buf: Vec<u8> = Vec::with_capacity(256);

    loop {
        buf.clear();
        let line_no = metadata.lines_read + 1;
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| classify_read_error(e, line_no))?;
        if n == 0 {
            break;
        }
        metadata.lines_read = line_no;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(_) => {
                handle_fault(
                    options.line_policy,
                    line_no,
                    LineError::InvalidUtf8,
                    &mut metadata,
                )?;
                continue;
            }
        };

        if line.trim().is_empty() {
            // A blank line has no fields; strict runs treat it like any other short line.
            if options.line_policy == LinePolicy::Strict {
                handle_fault(
                    options.line_policy,
                    line_no,
                    LineError::TooFewFields { found: 0 },
                    &mut metadata,
                )?;
            }
            metadata.blank_lines += 1;
            continue;
        }

        let observation = match parser.parse(line) {
            Ok(observation) => observation,
            Err(fault) => {
                handle_fault(options.line_policy, line_no, fault, &mut metadata)?;
                continue;
            }
        };

        if !options.filter.includes(observation.date) {
            metadata.lines_filtered += 1;
            continue;
        }

        aggregator.update(observation.key, observation.size);
        metadata.observations += 1;
    }

    metadata.elapsed_seconds = start.elapsed().as_secs_f64();

    if metadata.lines_skipped() > 0 {
        warn!(
            "Skipped {} malformed line(s): {}",
            metadata.lines_skipped(),
            format_skip_counts(&metadata.skipped_by_kind)
        );
    }
    debug!(
        "{} lines read, {} blank, {} filtered, {} aggregated into {} keys in {:.3}s",
        metadata.lines_read,
        metadata.blank_lines,
        metadata.lines_filtered,
        metadata.observations,
        aggregator.len(),
        metadata.elapsed_seconds,
    );

    Ok(AnalysisResult {
        aggregator,
        metadata,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Apply the line policy to one bad line.
fn handle_fault(
    policy: LinePolicy,
    line: u64,
    fault: LineError,
    metadata: &mut AnalysisMetadata,
) -> Result<()> {
    match policy {
        LinePolicy::Strict => Err(ExpsizeError::MalformedLine {
            line,
            source: fault,
        }),
        LinePolicy::Skip => {
            debug!("Skipping line {}: {}", line, fault);
            *metadata.skipped_by_kind.entry(fault.kind()).or_insert(0) += 1;
            Ok(())
        }
    }
}

fn format_skip_counts(counts: &BTreeMap<&'static str, u64>) -> String {
    counts
        .iter()
        .map(|(kind, n)| format!("{}={}", kind, n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_bound(bound: Option<chrono::NaiveDate>) -> String {
    bound.map_or_else(|| "unset".to_string(), |d| d.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
