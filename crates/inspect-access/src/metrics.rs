//! Counters for cache behaviour

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cache
    pub hits: u64,

    /// Reads that went to the store
    pub misses: u64,

    /// Entries dropped because their TTL elapsed
    pub expirations: u64,

    /// Entries dropped to respect the capacity bound
    pub evictions: u64,

    /// Calls made to the access store's `get`
    pub store_reads: u64,
}

impl CacheStats {
    /// Fraction of reads answered from the cache
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        [
            "Access Cache Summary".to_string(),
            "====================".to_string(),
            format!("Hits: {}", self.hits),
            format!("Misses: {}", self.misses),
            format!("Hit ratio: {:.1}%", self.hit_ratio() * 100.0),
            format!("Expirations: {}", self.expirations),
            format!("Evictions: {}", self.evictions),
            format!("Store reads: {}", self.store_reads),
        ]
        .join("\n")
    }
}

/// Shared counters updated by concurrent cache calls
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    evictions: AtomicU64,
    store_reads: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            store_reads: self.store_reads.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_snapshot() {
        let recorder = StatsRecorder::default();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_miss();
        recorder.record_store_read();
        recorder.record_expirations(3);
        recorder.record_eviction();

        let stats = recorder.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.store_reads, 1);
        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_hit_ratio() {
        assert_eq!(CacheStats::default().hit_ratio(), 0.0);

        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_mentions_counters() {
        let stats = CacheStats {
            hits: 7,
            evictions: 2,
            ..Default::default()
        };
        let summary = stats.summary();
        assert!(summary.contains("Hits: 7"));
        assert!(summary.contains("Evictions: 2"));
    }
}
