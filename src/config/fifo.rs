//! Configuration for the First-In-First-Out (FIFO) cache.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::FifoCacheConfig;
//! use policy_cache::FifoCache;
//! use core::num::NonZeroUsize;
//!
//! let config = FifoCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//! };
//! let cache: FifoCache<String, i32> = FifoCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a FIFO (First-In-First-Out) cache.
///
/// FIFO evicts entries in their original insertion order; overwriting an
/// existing key does not renew its position.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold
#[derive(Clone, Copy)]
pub struct FifoCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl FifoCacheConfig {
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

impl fmt::Debug for FifoCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_config_creation() {
        let config = FifoCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
        };
        assert_eq!(config.capacity.get(), 100);
        assert_eq!(config.capacity().get(), 100);
    }
}
