//! Per-object size aggregation.
//!
//! One [`StatsAggregator`] is owned by one pipeline run; shards built over
//! disjoint parts of a dump can be combined with [`StatsAggregator::merge`].

use std::collections::HashMap;

use expsize_core::models::{MinPolicy, ObjectStats};

// ── StatsAggregator ───────────────────────────────────────────────────────────

/// Running [`ObjectStats`] keyed by object key.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    stats: HashMap<String, ObjectStats>,
    policy: MinPolicy,
    observations: u64,
}

impl StatsAggregator {
    pub fn new(policy: MinPolicy) -> Self {
        Self {
            stats: HashMap::with_capacity(500),
            policy,
            observations: 0,
        }
    }

    /// Record one observed `size` for `key`, creating the entry on first sight.
    pub fn update(&mut self, key: &str, size: u64) {
        // Avoid allocating the key for objects already seen.
        if let Some(stats) = self.stats.get_mut(key) {
            stats.record(size, self.policy);
        } else {
            let mut stats = ObjectStats::default();
            stats.record(size, self.policy);
            self.stats.insert(key.to_string(), stats);
        }
        self.observations += 1;
    }

    /// Fold another shard's statistics into this one.
    pub fn merge(&mut self, other: &StatsAggregator) {
        for (key, theirs) in &other.stats {
            self.stats
                .entry(key.clone())
                .or_default()
                .merge(theirs, self.policy);
        }
        self.observations += other.observations;
    }

    pub fn get(&self, key: &str) -> Option<&ObjectStats> {
        self.stats.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Total observations folded in, across all keys.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Keys in lexicographic (byte) order.
    ///
    /// Reporting must iterate this sequence rather than the map itself.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.stats.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
