//! LIFO Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// LIFO-specific metrics (extends CoreCacheMetrics).
#[derive(Debug, Default, Clone)]
pub struct LifoCacheMetrics {
    /// Core metrics common to all cache variants
    pub core: CoreCacheMetrics,
}

impl LifoCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheMetrics for LifoCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LIFO"
    }
}
