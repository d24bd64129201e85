//! Unbounded Baseline Cache Implementation
//!
//! The basic cache is a plain key-value store with no capacity limit and no
//! eviction. It is the degenerate member of the policy family: every bounded
//! variant must agree with it while operating under capacity, which makes it
//! the reference oracle in the test suite.
//!
//! # Thread Safety
//!
//! Not thread-safe. Use the `concurrent` feature wrappers or external
//! synchronization for multi-threaded access.

extern crate alloc;

use crate::config::BasicCacheConfig;
use crate::metrics::{BasicCacheMetrics, CacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal basic segment: the store with no tracker.
///
/// Shared between `BasicCache` and `ConcurrentBasicCache`.
#[derive(Debug)]
pub(crate) struct BasicSegment<K, V, S = DefaultHashBuilder> {
    map: HashMap<K, V, S>,
    metrics: BasicCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> BasicSegment<K, V, S> {
    pub(crate) fn with_hasher(config: BasicCacheConfig, hash_builder: S) -> Self {
        BasicSegment {
            map: HashMap::with_capacity_and_hasher(config.initial_capacity, hash_builder),
            metrics: BasicCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &BasicCacheMetrics {
        &self.metrics
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key) {
            Some(value) => {
                self.metrics.core.record_hit();
                Some(value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get_mut(key) {
            Some(value) => {
                self.metrics.core.record_hit();
                Some(value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        let returned_key = key.clone();
        match self.map.insert(key, value) {
            Some(old_value) => {
                self.metrics.core.record_update();
                Some((returned_key, old_value))
            }
            None => {
                self.metrics.core.record_insertion();
                None
            }
        }
    }

    pub(crate) fn record_noop_put(&mut self) {
        self.metrics.core.record_noop_put();
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

/// An unbounded key-value cache with no eviction.
///
/// `BasicCache` is the baseline the bounded variants degenerate to while
/// they are under capacity: `put` inserts or overwrites unconditionally and
/// `get` is a plain lookup with no ordering side effects.
///
/// # Examples
///
/// ```
/// use policy_cache::BasicCache;
///
/// let mut cache = BasicCache::new();
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), None);
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug)]
pub struct BasicCache<K, V, S = DefaultHashBuilder> {
    segment: BasicSegment<K, V, S>,
}

impl<K: Hash + Eq, V> BasicCache<K, V> {
    /// Creates an empty unbounded cache.
    pub fn new() -> BasicCache<K, V, DefaultHashBuilder> {
        BasicCache::init(BasicCacheConfig::default())
    }

    /// Creates an unbounded cache from a configuration.
    ///
    /// The basic cache never evicts, so unlike the bounded variants there is
    /// no discard-listener parameter.
    pub fn init(config: BasicCacheConfig) -> BasicCache<K, V, DefaultHashBuilder> {
        BasicCache::init_with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for BasicCache<K, V> {
    fn default() -> Self {
        BasicCache::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> BasicCache<K, V, S> {
    /// Creates an unbounded cache with the supplied hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::init_with_hasher(BasicCacheConfig::default(), hash_builder)
    }

    /// Creates an unbounded cache from a configuration and hash builder.
    pub fn init_with_hasher(config: BasicCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: BasicSegment::with_hasher(config, hash_builder),
        }
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value corresponding to the key, or `None`
    /// if the key is not present.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Nullable lookup boundary: `None` keys are defined to be not found.
    #[inline]
    pub fn get_opt<Q>(&mut self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key?)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns `true` if the cache holds a value for `key`, without touching
    /// metrics or any ordering state.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> BasicCache<K, V, S> {
    /// Inserts a key-value pair, overwriting unconditionally.
    ///
    /// Returns `Some((key, old_value))` if the key was already present.
    /// There is no capacity check and no eviction.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }

    /// Nullable insertion boundary: if either the key or the value is
    /// absent, nothing happens (recorded as a `noop_put` in metrics).
    pub fn put_opt(&mut self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        match (key, value) {
            (Some(key), Some(value)) => self.segment.put(key, value),
            _ => {
                self.segment.record_noop_put();
                None
            }
        }
    }

    /// Removes a key from the cache, returning its value if present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for BasicCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
