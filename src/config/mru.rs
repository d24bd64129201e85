//! Configuration for the Most Recently Used (MRU) cache.

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an MRU (Most Recently Used) cache.
///
/// MRU evicts the entry touched most recently — the inverse of LRU. It
/// suits workloads where an item just accessed is the least likely to be
/// accessed again soon (for example, sequential scans).
///
/// # Examples
///
/// ```
/// use policy_cache::config::MruCacheConfig;
/// use policy_cache::MruCache;
/// use core::num::NonZeroUsize;
///
/// let config = MruCacheConfig {
///     capacity: NonZeroUsize::new(100).unwrap(),
/// };
/// let cache: MruCache<&str, i32> = MruCache::init(config, None);
/// ```
#[derive(Clone, Copy)]
pub struct MruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl MruCacheConfig {
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

impl fmt::Debug for MruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
