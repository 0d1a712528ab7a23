//! Cache Statistics Module
//!
//! Counters for lookups and lazy-expiry evictions on the reference backend.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the reference cache's activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found an entry (`get`) or a live entry (`has`)
    pub hits: u64,
    /// Lookups that came up empty or expired
    pub misses: u64,
    /// Entries removed because `has` found them expired
    pub evictions: u64,
    /// Current number of stored entries, live or not
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a stats record with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Updates the stored-entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
