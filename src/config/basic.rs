//! Configuration for the unbounded baseline cache.

use core::fmt;

/// Configuration for a [`BasicCache`](crate::BasicCache).
///
/// The basic cache has no capacity limit and never evicts, so its only
/// knob is how much map space to reserve up front.
///
/// # Examples
///
/// ```
/// use policy_cache::config::BasicCacheConfig;
/// use policy_cache::BasicCache;
///
/// let config = BasicCacheConfig { initial_capacity: 64 };
/// let cache: BasicCache<String, i32> = BasicCache::init(config);
/// ```
#[derive(Clone, Copy, Default)]
pub struct BasicCacheConfig {
    /// Number of entries to reserve map space for at construction. Zero
    /// means no reservation; the map grows on demand either way.
    pub initial_capacity: usize,
}

impl BasicCacheConfig {
    /// Creates a configuration reserving space for `initial_capacity`
    /// entries.
    #[inline]
    pub fn new(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}

impl fmt::Debug for BasicCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCacheConfig")
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_config_creation() {
        let config = BasicCacheConfig::new(16);
        assert_eq!(config.initial_capacity, 16);
        let config = BasicCacheConfig::default();
        assert_eq!(config.initial_capacity, 0);
    }
}
