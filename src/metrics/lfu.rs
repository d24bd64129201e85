//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache, which add
//! frequency-distribution information on top of the core counters.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics).
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache variants
    pub core: CoreCacheMetrics,

    /// Evictions where two or more keys tied at the minimum frequency and
    /// the recency stamp decided the victim
    pub tie_break_evictions: u64,

    /// Highest touch frequency any entry has reached
    pub peak_frequency: u64,
}

impl LfuCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an eviction, noting whether the victim was chosen out of a
    /// frequency tie.
    #[inline]
    pub fn record_eviction(&mut self, tie_broken: bool) {
        self.core.record_eviction();
        if tie_broken {
            self.tie_break_evictions += 1;
        }
    }

    /// Tracks the highest frequency observed so far.
    #[inline]
    pub fn observe_frequency(&mut self, frequency: u64) {
        if frequency > self.peak_frequency {
            self.peak_frequency = frequency;
        }
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert(
            "tie_break_evictions".to_string(),
            self.tie_break_evictions as f64,
        );
        metrics.insert("peak_frequency".to_string(), self.peak_frequency as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_counter() {
        let mut m = LfuCacheMetrics::new();
        m.record_eviction(false);
        m.record_eviction(true);
        m.record_eviction(true);
        assert_eq!(m.core.evictions, 3);
        assert_eq!(m.tie_break_evictions, 2);
    }

    #[test]
    fn test_peak_frequency_is_monotonic() {
        let mut m = LfuCacheMetrics::new();
        m.observe_frequency(3);
        m.observe_frequency(1);
        m.observe_frequency(5);
        assert_eq!(m.peak_frequency, 5);
        let report = m.metrics();
        assert_eq!(report.get("peak_frequency"), Some(&5.0));
    }
}
