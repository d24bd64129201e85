//! Basic Cache Metrics
//!
//! Metrics for the unbounded baseline cache.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Metrics for the unbounded [`BasicCache`](crate::BasicCache).
///
/// Only the core counters apply; the eviction counter stays at zero by
/// construction since the basic cache never evicts.
#[derive(Debug, Default, Clone)]
pub struct BasicCacheMetrics {
    /// Core metrics common to all cache variants
    pub core: CoreCacheMetrics,
}

impl BasicCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheMetrics for BasicCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "Basic"
    }
}
