//! Configuration for the Last-In-First-Out (LIFO) cache.

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a LIFO (Last-In-First-Out) cache.
///
/// LIFO evicts whatever key the most recent successful `put` touched, so
/// the cache behaves like a stack whose top is displaced by each new key
/// that arrives at capacity.
///
/// # Examples
///
/// ```
/// use policy_cache::config::LifoCacheConfig;
/// use policy_cache::LifoCache;
/// use core::num::NonZeroUsize;
///
/// let config = LifoCacheConfig {
///     capacity: NonZeroUsize::new(100).unwrap(),
/// };
/// let cache: LifoCache<&str, i32> = LifoCache::init(config, None);
/// ```
#[derive(Clone, Copy)]
pub struct LifoCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl LifoCacheConfig {
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

impl fmt::Debug for LifoCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_config_creation() {
        let config = LifoCacheConfig::new(NonZeroUsize::new(4).unwrap());
        assert_eq!(config.capacity().get(), 4);
    }
}
