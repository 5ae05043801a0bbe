//! Storage Statistics Module
//!
//! Counters updated by the storage engine under its own lock.

use serde::Serialize;

// == Storage Stats ==
/// Operation counters for a [`KvStore`](super::KvStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Reads that found their key
    pub hits: u64,
    /// Reads for an absent key
    pub misses: u64,
    /// Successful writes, both inserts and renewals
    pub sets: u64,
    /// Explicit deletes that removed an entry
    pub deletes: u64,
    /// Entries removed by the eviction scheduler
    pub evictions: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl StorageStats {
    // == Constructor ==
    /// Creates a new StorageStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_set(&mut self) {
        self.sets += 1;
    }

    pub(crate) fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StorageStats::new();
        assert_eq!(stats, StorageStats::default());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = StorageStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = StorageStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_write_counters() {
        let mut stats = StorageStats::new();
        stats.record_set();
        stats.record_set();
        stats.record_delete();
        stats.record_eviction();
        assert_eq!(stats.sets, 2);
        assert_eq!(stats.deletes, 1);
        assert_eq!(stats.evictions, 1);
    }
}
