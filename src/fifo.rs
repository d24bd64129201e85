//! First-In-First-Out (FIFO) Cache Implementation
//!
//! The FIFO cache evicts entries in their original insertion order: when a
//! new key arrives at capacity, the oldest inserted entry is discarded,
//! regardless of how often or how recently it has been read.
//!
//! # Algorithm
//!
//! An order list records insertion order, newest at the front. Reads have no
//! ordering side effect. Overwriting an existing key updates the value in
//! place and does NOT renew the key's position — its eviction turn is still
//! determined by its first insertion.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: Get O(1), Put O(1), Remove O(1)
//! - **Space Complexity**: O(n) in the capacity; one order-list node and one
//!   map slot per entry
//!
//! # When to Use
//!
//! FIFO suits workloads where entry age is the best predictor of staleness,
//! and workloads that need fully predictable eviction order.
//!
//! # Thread Safety
//!
//! Not thread-safe. Use [`ConcurrentFifoCache`](crate::concurrent::ConcurrentFifoCache)
//! (feature `concurrent`) or external synchronization for multi-threaded
//! access.

extern crate alloc;

use crate::config::FifoCacheConfig;
use crate::list::{OrderList, SlotId};
use crate::listener::SharedListener;
use crate::metrics::{CacheMetrics, FifoCacheMetrics};
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

/// Internal FIFO segment containing the actual cache algorithm.
///
/// Shared between `FifoCache` and `ConcurrentFifoCache`. The store is the
/// order list (nodes own the `(K, V)` pairs); the map indexes keys to list
/// slots. Both are mutated together on every path, keeping their key sets
/// identical.
pub(crate) struct FifoSegment<K, V, S = DefaultHashBuilder> {
    config: FifoCacheConfig,
    list: OrderList<(K, V)>,
    map: HashMap<K, SlotId, S>,
    metrics: FifoCacheMetrics,
    listener: Option<SharedListener<K, V>>,
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> FifoSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: FifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        let cap = config.capacity().get();
        FifoSegment {
            config,
            list: OrderList::with_capacity(cap),
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            metrics: FifoCacheMetrics::new(),
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
    pub(crate) fn metrics(&self) -> &FifoCacheMetrics {
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
        match self.map.get(key).copied() {
            Some(slot) => {
                self.metrics.core.record_hit();
                self.list.get(slot).map(|(_, value)| value)
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
        match self.map.get(key).copied() {
            Some(slot) => {
                self.metrics.core.record_hit();
                self.list.get_mut(slot).map(|(_, value)| value)
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
        if let Some(&slot) = self.map.get(&key) {
            // Overwrite in place; insertion order is not renewed.
            let old_value = self
                .list
                .get_mut(slot)
                .map(|entry| mem::replace(&mut entry.1, value));
            self.metrics.core.record_update();
            return old_value.map(|old_value| (key, old_value));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some((victim_key, victim_value)) = self.list.pop_back() {
                let removed = self.map.remove(&victim_key);
                debug_assert!(
                    removed.is_some(),
                    "victim selected by the order list is absent from the key map"
                );
                self.metrics.core.record_eviction();
                self.notify_discard(&victim_key, &victim_value);
                evicted = Some((victim_key, victim_value));
            }
        }

        let slot = self.list.push_front((key.clone(), value));
        self.map.insert(key, slot);
        self.metrics.core.record_insertion();
        debug_assert_eq!(self.map.len(), self.list.len());
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
        let slot = self.map.remove(key)?;
        let removed = self.list.remove(slot);
        debug_assert!(removed.is_some());
        removed.map(|(_, value)| value)
    }

    /// Removes and returns the current eviction candidate (the oldest
    /// inserted entry), or `None` if the cache is empty.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        let removed = self.map.remove(&key);
        debug_assert!(removed.is_some());
        self.metrics.core.record_eviction();
        Some((key, value))
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for FifoSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FifoSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

/// An implementation of a First-In-First-Out (FIFO) cache.
///
/// The cache has a fixed capacity. When a `put` of a new key arrives at
/// capacity, the entry with the oldest original insertion is evicted and the
/// optional discard listener fires with the victim before `put` returns.
/// Overwriting an existing key never evicts and never renews the key's
/// position in the insertion order.
///
/// # Examples
///
/// ```
/// use policy_cache::FifoCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = FifoCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Reads do not affect FIFO order.
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // "apple" is still the oldest insertion, so it is evicted.
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"apple"), None);
/// assert_eq!(cache.get(&"banana"), Some(&2));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct FifoCache<K, V, S = DefaultHashBuilder> {
    segment: FifoSegment<K, V, S>,
}

impl<K: Hash + Eq + 'static, V: 'static> FifoCache<K, V> {
    /// Creates a new FIFO cache with the specified capacity and no discard
    /// listener.
    pub fn new(cap: NonZeroUsize) -> FifoCache<K, V, DefaultHashBuilder> {
        FifoCache::init(FifoCacheConfig::new(cap), None)
    }

    /// Creates a new FIFO cache from a configuration and an optional
    /// discard listener.
    ///
    /// The listener is invoked with the victim's key and value on every
    /// capacity eviction, before the triggering `put` returns.
    pub fn init(
        config: FifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
    ) -> FifoCache<K, V, DefaultHashBuilder> {
        FifoCache::init_with_hasher(config, listener, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> FifoCache<K, V, S> {
    /// Creates a new FIFO cache with the specified capacity and hash
    /// builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(FifoCacheConfig::new(cap), None, hash_builder)
    }

    /// Creates a new FIFO cache from a configuration, optional discard
    /// listener, and hash builder.
    pub fn init_with_hasher(
        config: FifoCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: FifoSegment::with_hasher(config, listener, hash_builder),
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
    /// A FIFO read has no ordering side effect.
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

impl<K: Hash + Eq + Clone + 'static, V: 'static, S: BuildHasher> FifoCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key was already present, the value is overwritten in place
    /// (keeping its insertion-order position) and `Some((key, old_value))`
    /// is returned. Otherwise, if the cache is at capacity, the oldest
    /// inserted entry is evicted and returned.
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
    /// fire.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the current eviction candidate (the oldest
    /// inserted entry).
    ///
    /// ```
    /// use policy_cache::FifoCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = FifoCache::new(NonZeroUsize::new(2).unwrap());
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// assert_eq!(cache.pop(), Some(("a", 1)));
    /// ```
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

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> CacheMetrics for FifoCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
