//! Cache Metrics System
//!
//! A flexible metrics system for the cache family using BTreeMap-based
//! reporting. Each cache variant tracks its own specific counters while
//! implementing a common [`CacheMetrics`] trait.
//!
//! All counters are entry counts: this cache family is count-bounded, so
//! there is no byte accounting anywhere in the metrics.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap keeps the reported keys in a deterministic order, which makes
//! test assertions, logs, and CSV exports reproducible. With a dozen metric
//! keys the O(log n) lookup cost is irrelevant.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

// Re-export algorithm-specific metrics
pub mod basic;
pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod mru;

pub use basic::BasicCacheMetrics;
pub use fifo::FifoCacheMetrics;
pub use lfu::LfuCacheMetrics;
pub use lifo::LifoCacheMetrics;
pub use mru::MruCacheMetrics;

/// Common counters tracked by every cache variant.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made against the cache
    pub requests: u64,

    /// Number of lookups that found the key
    pub cache_hits: u64,

    /// Number of new keys inserted
    pub insertions: u64,

    /// Number of `put` calls that overwrote an existing key
    pub updates: u64,

    /// Number of entries evicted to stay within capacity
    pub evictions: u64,

    /// Number of `put_opt` calls dropped because the key or value was absent
    pub noop_puts: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found the key.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find the key.
    ///
    /// Misses are also derivable as `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records the insertion of a new key.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records the overwrite of an existing key.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records a `put_opt` that was dropped at the nullable boundary.
    #[inline]
    pub fn record_noop_put(&mut self) {
        self.noop_puts += 1;
    }

    /// Cache hit rate in `[0.0, 1.0]`, or `0.0` before any request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Cache miss rate in `[0.0, 1.0]`, or `0.0` before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the core counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("noop_puts".to_string(), self.noop_puts as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache variants implement for metrics reporting.
///
/// BTreeMap guarantees deterministic key ordering, which keeps benchmark
/// comparisons and test output stable.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g., "FIFO", "MRU").
    fn algorithm_name(&self) -> &'static str;
}
