//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LfuCacheConfig;
//! use policy_cache::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LFU (Least Frequently Used) cache with LRU
/// tie-break.
///
/// LFU tracks a touch frequency per key and evicts the key with the lowest
/// frequency; when several keys tie at the minimum, the least recently
/// touched of the tied set is evicted.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold
#[derive(Clone, Copy)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl LfuCacheConfig {
    /// Creates a configuration with the given capacity.
    #[inline]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
        };
        assert_eq!(config.capacity.get(), 100);
    }
}
