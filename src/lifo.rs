//! Last-In-First-Out (LIFO) Cache Implementation
//!
//! The LIFO cache evicts the most recently inserted entry: when a new key
//! arrives at capacity, the entry written by the latest successful `put` is
//! discarded to make room. Older entries are effectively pinned until they
//! are removed explicitly.
//!
//! # Algorithm
//!
//! A single pointer tracks the key of the latest successful insertion.
//! Every `put` that stores a value advances the pointer, including
//! overwrites of existing keys. Reads never move it. At capacity the
//! pointed entry is the victim; after the eviction the incoming key becomes
//! the new pointer target.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: Get O(1), Put O(1), Remove O(1)
//! - **Space Complexity**: O(n) in the capacity; one map slot per entry
//!   plus one tracked key
//!
//! # When to Use
//!
//! LIFO suits workloads where the earliest entries are the most valuable
//! and later writes are transient, such as bootstrap data that must survive
//! churny tail traffic.
//!
//! # Thread Safety
//!
//! Not thread-safe. Use [`ConcurrentLifoCache`](crate::concurrent::ConcurrentLifoCache)
//! (feature `concurrent`) or external synchronization for multi-threaded
//! access.

extern crate alloc;

use crate::config::LifoCacheConfig;
use crate::listener::SharedListener;
use crate::metrics::{CacheMetrics, LifoCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LIFO segment containing the actual cache algorithm.
///
/// Shared between `LifoCache` and `ConcurrentLifoCache`. The tracker is a
/// single key: whichever `put` stored last. A cache at capacity always has
/// a tracked key, because every path that fills the cache ends in a
/// successful `put`.
pub(crate) struct LifoSegment<K, V, S = DefaultHashBuilder> {
    config: LifoCacheConfig,
    map: HashMap<K, V, S>,
    last_insert: Option<K>,
    metrics: LifoCacheMetrics,
    listener: Option<SharedListener<K, V>>,
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> LifoSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: LifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        let cap = config.capacity().get();
        LifoSegment {
            config,
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            last_insert: None,
            metrics: LifoCacheMetrics::new(),
            listener,
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
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
    pub(crate) fn metrics(&self) -> &LifoCacheMetrics {
        &self.metrics
    }

    fn notify_discard(&self, key: &K, value: &V) {
        if let Some(listener) = &self.listener {
            listener.on_discard(key, value);
        }
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
        if let Some(slot) = self.map.get_mut(&key) {
            // An overwrite is still the latest insertion.
            let old_value = mem::replace(slot, value);
            self.last_insert = Some(key.clone());
            self.metrics.core.record_update();
            return Some((key, old_value));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            let victim_key = self.last_insert.take();
            debug_assert!(
                victim_key.is_some(),
                "a cache at capacity always has a latest insertion"
            );
            if let Some(victim_key) = victim_key {
                if let Some(victim_value) = self.map.remove(&victim_key) {
                    self.metrics.core.record_eviction();
                    self.notify_discard(&victim_key, &victim_value);
                    evicted = Some((victim_key, victim_value));
                }
            }
        }

        self.last_insert = Some(key.clone());
        self.map.insert(key, value);
        self.metrics.core.record_insertion();
        debug_assert!(self.map.len() <= self.cap().get());
        evicted
    }

    pub(crate) fn record_noop_put(&mut self) {
        self.metrics.core.record_noop_put();
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.map.remove(key)?;
        let pointed = self
            .last_insert
            .as_ref()
            .is_some_and(|pointed| pointed.borrow() == key);
        if pointed {
            self.last_insert = None;
        }
        Some(value)
    }

    /// Removes and returns the current eviction candidate (the latest
    /// insertion), or `None` if no candidate is tracked.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        let key = self.last_insert.take()?;
        let value = self.map.remove(&key)?;
        self.metrics.core.record_eviction();
        Some((key, value))
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.last_insert = None;
    }
}

impl<K, V, S> core::fmt::Debug for LifoSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LifoSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.map.len())
            .finish()
    }
}

/// An implementation of a Last-In-First-Out (LIFO) cache.
///
/// The cache has a fixed capacity. When a `put` of a new key arrives at
/// capacity, the most recently inserted entry is evicted and the optional
/// discard listener fires with the victim before `put` returns. Every
/// successful `put`, including an overwrite, marks its key as the next
/// eviction candidate; reads never do.
///
/// # Examples
///
/// ```
/// use policy_cache::LifoCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LifoCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // "banana" is the latest insertion, so it is the one displaced.
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LifoCache<K, V, S = DefaultHashBuilder> {
    segment: LifoSegment<K, V, S>,
}

impl<K: Hash + Eq + 'static, V: 'static> LifoCache<K, V> {
    /// Creates a new LIFO cache with the specified capacity and no discard
    /// listener.
    pub fn new(cap: NonZeroUsize) -> LifoCache<K, V, DefaultHashBuilder> {
        LifoCache::init(LifoCacheConfig::new(cap), None)
    }

    /// Creates a new LIFO cache from a configuration and an optional
    /// discard listener.
    ///
    /// The listener is invoked with the victim's key and value on every
    /// capacity eviction, before the triggering `put` returns.
    pub fn init(
        config: LifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
    ) -> LifoCache<K, V, DefaultHashBuilder> {
        LifoCache::init_with_hasher(config, listener, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> LifoCache<K, V, S> {
    /// Creates a new LIFO cache with the specified capacity and hash
    /// builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(LifoCacheConfig::new(cap), None, hash_builder)
    }

    /// Creates a new LIFO cache from a configuration, optional discard
    /// listener, and hash builder.
    pub fn init_with_hasher(
        config: LifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: LifoSegment::with_hasher(config, listener, hash_builder),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
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

    /// Returns a reference to the value corresponding to the key.
    ///
    /// A LIFO read has no ordering side effect.
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

impl<K: Hash + Eq + Clone + 'static, V: 'static, S: BuildHasher> LifoCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key was already present, the value is overwritten and
    /// `Some((key, old_value))` is returned; the key becomes the next
    /// eviction candidate. Otherwise, if the cache is at capacity, the most
    /// recently inserted entry is evicted and returned.
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
    ///
    /// Explicit removal is not an eviction: the discard listener does not
    /// fire. Removing the tracked latest insertion leaves the cache with no
    /// eviction candidate until the next `put`.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the current eviction candidate (the latest
    /// insertion), or `None` if no candidate is tracked.
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.segment.pop()
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> CacheMetrics for LifoCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
