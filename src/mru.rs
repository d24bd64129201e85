//! Most-Recently-Used (MRU) Cache Implementation
//!
//! The MRU cache evicts the entry that was touched last: when a new key
//! arrives at capacity, the most recently used entry is discarded. This is
//! the mirror image of LRU and protects cold entries instead of hot ones.
//!
//! # Algorithm
//!
//! A recency list keeps entries ordered by last touch, newest at the front.
//! Both reads and overwrites move the touched entry to the front; the
//! victim is always the front entry at the moment a new key needs room.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: Get O(1), Put O(1), Remove O(1)
//! - **Space Complexity**: O(n) in the capacity; one recency-list node and
//!   one map slot per entry
//!
//! # When to Use
//!
//! MRU suits cyclic scans larger than the cache, where the item touched a
//! moment ago is the one least likely to be needed again soon.
//!
//! # Thread Safety
//!
//! Not thread-safe. Use [`ConcurrentMruCache`](crate::concurrent::ConcurrentMruCache)
//! (feature `concurrent`) or external synchronization for multi-threaded
//! access.

extern crate alloc;

use crate::config::MruCacheConfig;
use crate::list::{OrderList, SlotId};
use crate::listener::SharedListener;
use crate::metrics::{CacheMetrics, MruCacheMetrics};
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

/// Internal MRU segment containing the actual cache algorithm.
///
/// Shared between `MruCache` and `ConcurrentMruCache`. The recency list
/// owns the `(K, V)` pairs, newest touch at the front; the map indexes keys
/// to list slots. Every touch path moves the entry to the front, so the
/// front is always the eviction candidate.
pub(crate) struct MruSegment<K, V, S = DefaultHashBuilder> {
    config: MruCacheConfig,
    list: OrderList<(K, V)>,
    map: HashMap<K, SlotId, S>,
    metrics: MruCacheMetrics,
    listener: Option<SharedListener<K, V>>,
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> MruSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: MruCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        let cap = config.capacity().get();
        MruSegment {
            config,
            list: OrderList::with_capacity(cap),
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            metrics: MruCacheMetrics::new(),
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
    pub(crate) fn metrics(&self) -> &MruCacheMetrics {
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
                self.list.move_to_front(slot);
                self.list.front().map(|(_, value)| value)
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
                self.list.move_to_front(slot);
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
            // An overwrite counts as a touch.
            let old_value = self
                .list
                .get_mut(slot)
                .map(|entry| mem::replace(&mut entry.1, value));
            self.list.move_to_front(slot);
            self.metrics.core.record_update();
            return old_value.map(|old_value| (key, old_value));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some((victim_key, victim_value)) = self.list.pop_front() {
                let removed = self.map.remove(&victim_key);
                debug_assert!(
                    removed.is_some(),
                    "victim selected by the recency list is absent from the key map"
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

    /// Removes and returns the current eviction candidate (the most
    /// recently touched entry), or `None` if the cache is empty.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_front()?;
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

impl<K, V, S> core::fmt::Debug for MruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MruSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

/// An implementation of a Most-Recently-Used (MRU) cache.
///
/// The cache has a fixed capacity. When a `put` of a new key arrives at
/// capacity, the entry whose last touch (read or overwrite) is the most
/// recent is evicted and the optional discard listener fires with the
/// victim before `put` returns.
///
/// # Examples
///
/// ```
/// use policy_cache::MruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Reading "apple" makes it the most recently used entry,
/// // so it is the one displaced by the next new key.
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// cache.put("cherry", 3);
///
/// assert_eq!(cache.get(&"apple"), None);
/// assert_eq!(cache.get(&"banana"), Some(&2));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct MruCache<K, V, S = DefaultHashBuilder> {
    segment: MruSegment<K, V, S>,
}

impl<K: Hash + Eq + 'static, V: 'static> MruCache<K, V> {
    /// Creates a new MRU cache with the specified capacity and no discard
    /// listener.
    pub fn new(cap: NonZeroUsize) -> MruCache<K, V, DefaultHashBuilder> {
        MruCache::init(MruCacheConfig::new(cap), None)
    }

    /// Creates a new MRU cache from a configuration and an optional discard
    /// listener.
    ///
    /// The listener is invoked with the victim's key and value on every
    /// capacity eviction, before the triggering `put` returns.
    pub fn init(
        config: MruCacheConfig,
        listener: Option<SharedListener<K, V>>,
    ) -> MruCache<K, V, DefaultHashBuilder> {
        MruCache::init_with_hasher(config, listener, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> MruCache<K, V, S> {
    /// Creates a new MRU cache with the specified capacity and hash
    /// builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(MruCacheConfig::new(cap), None, hash_builder)
    }

    /// Creates a new MRU cache from a configuration, optional discard
    /// listener, and hash builder.
    pub fn init_with_hasher(
        config: MruCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: MruSegment::with_hasher(config, listener, hash_builder),
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
    /// A hit marks the entry as the most recently used, making it the next
    /// eviction candidate.
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

    /// Returns a mutable reference to the value corresponding to the key,
    /// marking the entry as the most recently used.
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

impl<K: Hash + Eq + Clone + 'static, V: 'static, S: BuildHasher> MruCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key was already present, the value is overwritten, the entry
    /// becomes the most recently used, and `Some((key, old_value))` is
    /// returned. Otherwise, if the cache is at capacity, the most recently
    /// used entry is evicted and returned.
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

    /// Removes and returns the current eviction candidate (the most
    /// recently touched entry).
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

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> CacheMetrics for MruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::listener::FnListener;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::Mutex;

    #[test]
    fn test_mru_evicts_most_recent_insertion() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        // No reads in between: "b" is the most recent touch.
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_mru_get_marks_entry_as_victim() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_mru_overwrite_counts_as_touch() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        // Overwriting "b" makes it the most recent touch again.
        assert_eq!(cache.put("b", 20), Some(("b", 2)));
        assert_eq!(cache.put("c", 3), Some(("b", 20)));
        assert_eq!(cache.get(&"a"), Some(&1));
    }

    #[test]
    fn test_mru_get_mut_counts_as_touch() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        if let Some(value) = cache.get_mut(&"a") {
            *value = 10;
        }
        assert_eq!(cache.put("c", 3), Some(("a", 10)));
    }

    #[test]
    fn test_mru_contains_key_is_not_a_touch() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.contains_key(&"a"));
        // "b" is still the most recent touch.
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
    }

    #[test]
    fn test_mru_cold_entries_survive_scans() {
        let mut cache = MruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put(0, 0);
        cache.put(1, 1);
        for i in 2..100 {
            cache.put(i, i);
            assert_eq!(cache.len(), 3);
        }
        // Each scan insertion displaces the previous one, never the cold
        // pair at the back of the recency order.
        assert_eq!(cache.get(&0), Some(&0));
        assert_eq!(cache.get(&1), Some(&1));
    }

    #[test]
    fn test_mru_remove() {
        let mut cache = MruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.remove(&"c"), Some(3));
        assert_eq!(cache.remove(&"c"), None);
        // "b" is now the most recent remaining touch.
        cache.put("d", 4);
        assert_eq!(cache.put("e", 5), Some(("d", 4)));
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[test]
    fn test_mru_pop_drains_newest_first() {
        let mut cache = MruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");
        assert_eq!(cache.pop(), Some(("a", 1)));
        assert_eq!(cache.pop(), Some(("c", 3)));
        assert_eq!(cache.pop(), Some(("b", 2)));
        assert_eq!(cache.pop(), None);
    }

    #[test]
    fn test_mru_discard_listener() {
        let discarded: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&discarded);
        let mut cache = MruCache::init(
            MruCacheConfig::new(NonZeroUsize::new(2).unwrap()),
            Some(Arc::new(FnListener(move |key: &&'static str, _: &i32| {
                log.lock().unwrap().push(*key);
            }))),
        );
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);
        assert_eq!(*discarded.lock().unwrap(), ["a"]);
    }

    #[test]
    fn test_mru_metrics() {
        let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"missing");
        cache.put("c", 3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "MRU");
    }
}
