use expsize_data::aggregator::StatsAggregator;
use serde::Serialize;

/// One reported object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub key: String,
    pub max: u64,
    pub mean: u64,
    pub min: u64,
}

/// Totals across all reported objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of distinct object keys.
    pub total_files: u64,
    /// Sum over keys of each key's largest observed size.
    pub total_size_bytes: u64,
}

/// Final, read-only view of an aggregation run, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub summary: Summary,
}

impl Report {
    /// Build the report from the aggregator's sorted key sequence.
    ///
    /// The total size sums per-key maxima, approximating the current
    /// footprint when a dump holds several snapshots of the same object.
    pub fn from_aggregator(aggregator: &StatsAggregator) -> Self {
        let mut entries = Vec::with_capacity(aggregator.len());
        let mut total_size_bytes: u64 = 0;

        for key in aggregator.sorted_keys() {
            let Some(stats) = aggregator.get(key) else {
                continue;
            };
            total_size_bytes = total_size_bytes.saturating_add(stats.max());
            entries.push(ReportEntry {
                key: key.to_string(),
                max: stats.max(),
                mean: stats.mean(),
                min: stats.min(),
            });
        }

        let summary = Summary {
            total_files: entries.len() as u64,
            total_size_bytes,
        };
        Self { entries, summary }
    }
}
