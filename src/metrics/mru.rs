//! MRU Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// MRU-specific metrics (extends CoreCacheMetrics).
#[derive(Debug, Default, Clone)]
pub struct MruCacheMetrics {
    /// Core metrics common to all cache variants
    pub core: CoreCacheMetrics,
}

impl MruCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheMetrics for MruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "MRU"
    }
}
