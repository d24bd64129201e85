//! FIFO Cache Metrics
//!
//! Metrics specific to the FIFO (First-In-First-Out) cache.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// FIFO-specific metrics (extends CoreCacheMetrics).
///
/// FIFO uses only the core counters; the structure exists for consistency
/// with the other cache variants and as an extension point.
#[derive(Debug, Default, Clone)]
pub struct FifoCacheMetrics {
    /// Core metrics common to all cache variants
    pub core: CoreCacheMetrics,
}

impl FifoCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheMetrics for FifoCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "FIFO"
    }
}
