use chrono::NaiveDate;

/// Number of leading path characters dropped to obtain an object key in the
/// standard inventory dump.
pub const DEFAULT_KEY_PREFIX_LEN: usize = 52;

/// One dump line: the observation date, the object size and the object key.
///
/// Borrows the key from the line buffer; it is consumed by the aggregator
/// before the next line is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation<'a> {
    pub date: NaiveDate,
    pub size: u64,
    pub key: &'a str,
}

/// How the running minimum treats an observed size of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MinPolicy {
    /// Legacy rule: a stored minimum of `0` counts as "unset", so the next
    /// observation always replaces it. A key whose sizes are `[0, 5]` reports
    /// `min == 5`, while `[5, 0]` reports `min == 0`.
    #[default]
    ZeroSentinel,
    /// The minimum is the smallest size actually observed, zero included.
    Exact,
}

/// What to do with a line that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinePolicy {
    /// Log and count the line, then continue with the next one.
    #[default]
    Skip,
    /// Abort the run on the first bad line.
    Strict,
}

/// Encoder used for the structured report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StructuredFormat {
    #[default]
    Yaml,
    Json,
}

/// Report rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One `key max:<v> mean:<v> min:<v>` line per key plus two summary lines.
    #[default]
    Text,
    /// A nested `files` / `summary` mapping handed to a structured encoder.
    Structured(StructuredFormat),
}

impl OutputMode {
    /// Parse a `--output` value: `text`, `yaml` or `json`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(OutputMode::Text),
            "yaml" | "structured" => Some(OutputMode::Structured(StructuredFormat::Yaml)),
            "json" => Some(OutputMode::Structured(StructuredFormat::Json)),
            _ => None,
        }
    }
}

// ── ObjectStats ───────────────────────────────────────────────────────────────

/// Running size statistics for one object key.
///
/// A fresh value reports `0` for every statistic. Once at least one size has
/// been recorded, `sum` is the sum of recorded sizes and `max` the largest
/// one; `min` follows the [`MinPolicy`] in force.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectStats {
    sum: u64,
    count: u64,
    min: Option<u64>,
    max: u64,
}

impl ObjectStats {
    /// Fold one observed size into the statistics.
    pub fn record(&mut self, size: u64, policy: MinPolicy) {
        self.count += 1;
        self.sum = self.sum.saturating_add(size);

        let replace_min = match (self.min, policy) {
            (None, _) => true,
            (Some(current), MinPolicy::ZeroSentinel) => size < current || current == 0,
            (Some(current), MinPolicy::Exact) => size < current,
        };
        if replace_min {
            self.min = Some(size);
        }

        if size > self.max {
            self.max = size;
        }
    }

    /// Combine statistics gathered for the same key on another shard.
    ///
    /// Under [`MinPolicy::ZeroSentinel`] a stored zero minimum yields to the
    /// other side's minimum, mirroring the sequential rule; results match a
    /// sequential run exactly only when no zero sizes were observed.
    pub fn merge(&mut self, other: &ObjectStats, policy: MinPolicy) {
        self.count += other.count;
        self.sum = self.sum.saturating_add(other.sum);
        self.max = self.max.max(other.max);
        self.min = match (self.min, other.min) {
            (None, m) | (m, None) => m,
            (Some(a), Some(b)) => Some(match policy {
                MinPolicy::Exact => a.min(b),
                MinPolicy::ZeroSentinel if a == 0 => b,
                MinPolicy::ZeroSentinel if b == 0 => a,
                MinPolicy::ZeroSentinel => a.min(b),
            }),
        };
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Smallest recorded size, or `0` when nothing has been recorded.
    pub fn min(&self) -> u64 {
        self.min.unwrap_or(0)
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Truncating integer mean; `0` when nothing has been recorded.
    pub fn mean(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        self.sum / self.count
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_from(sizes: &[u64], policy: MinPolicy) -> ObjectStats {
        let mut stats = ObjectStats::default();
        for &size in sizes {
            stats.record(size, policy);
        }
        stats
    }

    // ── record ────────────────────────────────────────────────────────────────

    #[test]
    fn test_fresh_stats_are_all_zero() {
        let stats = ObjectStats::default();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.sum(), 0);
        assert_eq!(stats.min(), 0);
        assert_eq!(stats.max(), 0);
        assert_eq!(stats.mean(), 0);
    }

    #[test]
    fn test_single_observation() {
        let stats = stats_from(&[1234], MinPolicy::ZeroSentinel);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.min(), 1234);
        assert_eq!(stats.max(), 1234);
        assert_eq!(stats.mean(), 1234);
    }

    #[test]
    fn test_min_max_mean_over_several_observations() {
        let stats = stats_from(&[100, 300, 50, 200], MinPolicy::ZeroSentinel);
        assert_eq!(stats.count(), 4);
        assert_eq!(stats.sum(), 650);
        assert_eq!(stats.min(), 50);
        assert_eq!(stats.max(), 300);
        assert_eq!(stats.mean(), 162);
    }

    #[test]
    fn test_mean_truncates() {
        let stats = stats_from(&[1, 2], MinPolicy::Exact);
        assert_eq!(stats.mean(), 1);
    }

    #[test]
    fn test_only_zero_sizes_keep_zero_min_and_max() {
        let mut stats = ObjectStats::default();
        for _ in 0..3 {
            stats.record(0, MinPolicy::ZeroSentinel);
            assert_eq!(stats.min(), 0);
            assert_eq!(stats.max(), 0);
        }
        assert_eq!(stats.count(), 3);
    }

    #[test]
    fn test_zero_sentinel_zero_then_positive() {
        let stats = stats_from(&[0, 5], MinPolicy::ZeroSentinel);
        assert_eq!(stats.max(), 5);
        // The stored zero reads as "unset", so the later size replaces it.
        assert_eq!(stats.min(), 5);
        assert_eq!(stats.mean(), 2);
    }

    #[test]
    fn test_zero_sentinel_positive_then_zero() {
        let stats = stats_from(&[5, 0], MinPolicy::ZeroSentinel);
        assert_eq!(stats.min(), 0);
        assert_eq!(stats.max(), 5);
    }

    #[test]
    fn test_zero_sentinel_zero_then_positive_then_smaller() {
        let stats = stats_from(&[0, 5, 3], MinPolicy::ZeroSentinel);
        assert_eq!(stats.min(), 3);
    }

    #[test]
    fn test_exact_policy_keeps_observed_zero() {
        let stats = stats_from(&[0, 5], MinPolicy::Exact);
        assert_eq!(stats.min(), 0);
        assert_eq!(stats.max(), 5);
    }

    #[test]
    fn test_exact_policy_bounds_hold() {
        let stats = stats_from(&[7, 0, 9, 3], MinPolicy::Exact);
        assert!(stats.min() <= stats.mean());
        assert!(stats.mean() <= stats.max());
    }

    // ── merge ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_merge_matches_sequential_without_zeros() {
        let sizes = [40, 10, 90, 25, 60];
        let sequential = stats_from(&sizes, MinPolicy::ZeroSentinel);

        let mut left = stats_from(&sizes[..2], MinPolicy::ZeroSentinel);
        let right = stats_from(&sizes[2..], MinPolicy::ZeroSentinel);
        left.merge(&right, MinPolicy::ZeroSentinel);

        assert_eq!(left, sequential);
    }

    #[test]
    fn test_merge_exact_matches_sequential_with_zeros() {
        let sizes = [40, 0, 90, 25];
        let sequential = stats_from(&sizes, MinPolicy::Exact);

        let mut left = stats_from(&sizes[2..], MinPolicy::Exact);
        let right = stats_from(&sizes[..2], MinPolicy::Exact);
        left.merge(&right, MinPolicy::Exact);

        assert_eq!(left, sequential);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = stats_from(&[3, 8], MinPolicy::ZeroSentinel);
        let b = stats_from(&[0, 1], MinPolicy::ZeroSentinel);

        let mut ab = a.clone();
        ab.merge(&b, MinPolicy::ZeroSentinel);
        let mut ba = b.clone();
        ba.merge(&a, MinPolicy::ZeroSentinel);

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = stats_from(&[3, 8], MinPolicy::Exact);
        let mut merged = a.clone();
        merged.merge(&ObjectStats::default(), MinPolicy::Exact);
        assert_eq!(merged, a);
    }

    // ── OutputMode ────────────────────────────────────────────────────────────

    #[test]
    fn test_output_mode_from_name() {
        assert_eq!(OutputMode::from_name("text"), Some(OutputMode::Text));
        assert_eq!(
            OutputMode::from_name("YAML"),
            Some(OutputMode::Structured(StructuredFormat::Yaml))
        );
        assert_eq!(
            OutputMode::from_name("json"),
            Some(OutputMode::Structured(StructuredFormat::Json))
        );
        assert_eq!(OutputMode::from_name("xml"), None);
    }
}
