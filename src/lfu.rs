//! Least-Frequently-Used (LFU) Cache Implementation
//!
//! The LFU cache evicts the entry with the fewest touches. A touch is any
//! hit: a successful read or an overwrite of an existing key. When two or
//! more entries tie at the minimum frequency, the tie is broken toward the
//! entry whose last touch is oldest, so a pure tie among never-read entries
//! falls back to insertion order.
//!
//! # Algorithm
//!
//! Each entry carries an [`LfuMeta`](crate::LfuMeta): a touch frequency
//! (starting at 1 on insertion) and the logical time of its last touch,
//! drawn from a cache-global monotonic clock. An ordered index maps
//! `(frequency, last_touch)` ranks to keys; stamps are unique, so ranks
//! never collide and the smallest index entry is always the eviction
//! victim.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: Get O(log n), Put O(log n), Remove O(log n)
//! - **Space Complexity**: O(n) in the capacity; one map slot and one index
//!   entry per cached item
//!
//! # When to Use
//!
//! LFU suits skewed workloads with a stable popular set, where frequency is
//! a better signal than recency and one-shot keys should be displaced
//! first.
//!
//! # Thread Safety
//!
//! Not thread-safe. Use [`ConcurrentLfuCache`](crate::concurrent::ConcurrentLfuCache)
//! (feature `concurrent`) or external synchronization for multi-threaded
//! access.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::listener::SharedListener;
use crate::meta::LfuMeta;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
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

/// Internal LFU segment containing the actual cache algorithm.
///
/// Shared between `LfuCache` and `ConcurrentLfuCache`. The store maps keys
/// to `(LfuMeta, V)` pairs; the index orders `(frequency, last_touch)`
/// ranks. The clock is bumped on every touch, so each live rank is unique
/// and the two structures stay in one-to-one correspondence.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    map: HashMap<K, (LfuMeta, V), S>,
    index: BTreeMap<(u64, u64), K>,
    clock: u64,
    metrics: LfuCacheMetrics,
    listener: Option<SharedListener<K, V>>,
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> LfuSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: LfuCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        let cap = config.capacity().get();
        LfuSegment {
            config,
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            index: BTreeMap::new(),
            clock: 0,
            metrics: LfuCacheMetrics::new(),
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
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    fn notify_discard(&self, key: &K, value: &V) {
        if let Some(listener) = &self.listener {
            listener.on_discard(key, value);
        }
    }

    /// Re-ranks an entry after a touch: pulls its old index entry and files
    /// the owned key back under the new rank.
    fn rerank(index: &mut BTreeMap<(u64, u64), K>, old_rank: (u64, u64), new_rank: (u64, u64)) {
        let owned_key = index.remove(&old_rank);
        debug_assert!(
            owned_key.is_some(),
            "a live entry always has a matching rank in the frequency index"
        );
        if let Some(owned_key) = owned_key {
            index.insert(new_rank, owned_key);
        }
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get_mut(key) {
            Some(entry) => {
                self.metrics.core.record_hit();
                let old_rank = entry.0.rank();
                self.clock += 1;
                entry.0.touch(self.clock);
                self.metrics.observe_frequency(entry.0.frequency);
                Self::rerank(&mut self.index, old_rank, entry.0.rank());
                Some(&entry.1)
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
            Some(entry) => {
                self.metrics.core.record_hit();
                let old_rank = entry.0.rank();
                self.clock += 1;
                entry.0.touch(self.clock);
                self.metrics.observe_frequency(entry.0.frequency);
                Self::rerank(&mut self.index, old_rank, entry.0.rank());
                Some(&mut entry.1)
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
        if let Some(entry) = self.map.get_mut(&key) {
            // An overwrite is a touch: bump the frequency and stamp.
            let old_rank = entry.0.rank();
            self.clock += 1;
            entry.0.touch(self.clock);
            let frequency = entry.0.frequency;
            let old_value = mem::replace(&mut entry.1, value);
            Self::rerank(&mut self.index, old_rank, (frequency, self.clock));
            self.metrics.observe_frequency(frequency);
            self.metrics.core.record_update();
            return Some((key, old_value));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            evicted = self.evict_minimum(true);
        }

        self.clock += 1;
        let meta = LfuMeta::first_touch(self.clock);
        self.index.insert(meta.rank(), key.clone());
        self.metrics.observe_frequency(meta.frequency);
        self.map.insert(key, (meta, value));
        self.metrics.core.record_insertion();
        debug_assert_eq!(self.map.len(), self.index.len());
        evicted
    }

    /// Removes the entry with the smallest `(frequency, last_touch)` rank.
    ///
    /// Also classifies the eviction for metrics: it is a tie break when the
    /// next-ranked entry shares the victim's frequency.
    fn evict_minimum(&mut self, notify: bool) -> Option<(K, V)> {
        let mut entries = self.index.iter();
        let (&victim_rank, _) = entries.next()?;
        let tie_broken = entries
            .next()
            .is_some_and(|(&(frequency, _), _)| frequency == victim_rank.0);
        drop(entries);

        let victim_key = self.index.remove(&victim_rank)?;
        let removed = self.map.remove(&victim_key);
        debug_assert!(
            removed.is_some(),
            "victim selected by the frequency index is absent from the store"
        );
        let (_, victim_value) = removed?;
        self.metrics.record_eviction(tie_broken);
        if notify {
            self.notify_discard(&victim_key, &victim_value);
        }
        Some((victim_key, victim_value))
    }

    pub(crate) fn record_noop_put(&mut self) {
        self.metrics.core.record_noop_put();
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (meta, value) = self.map.remove(key)?;
        let removed = self.index.remove(&meta.rank());
        debug_assert!(removed.is_some());
        Some(value)
    }

    /// Removes and returns the current eviction candidate (the least
    /// frequently used entry, oldest touch on a tie), or `None` if the
    /// cache is empty.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        self.evict_minimum(false)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.index.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.map.len())
            .field("clock", &self.clock)
            .finish()
    }
}

/// An implementation of a Least-Frequently-Used (LFU) cache.
///
/// The cache has a fixed capacity. When a `put` of a new key arrives at
/// capacity, the entry with the lowest touch frequency is evicted and the
/// optional discard listener fires with the victim before `put` returns.
/// On a frequency tie the entry with the oldest last touch loses, which for
/// never-read entries means the oldest insertion.
///
/// # Examples
///
/// ```
/// use policy_cache::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // "apple" now has frequency 2, "banana" stays at 1.
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq + 'static, V: 'static> LfuCache<K, V> {
    /// Creates a new LFU cache with the specified capacity and no discard
    /// listener.
    pub fn new(cap: NonZeroUsize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::init(LfuCacheConfig::new(cap), None)
    }

    /// Creates a new LFU cache from a configuration and an optional discard
    /// listener.
    ///
    /// The listener is invoked with the victim's key and value on every
    /// capacity eviction, before the triggering `put` returns.
    pub fn init(
        config: LfuCacheConfig,
        listener: Option<SharedListener<K, V>>,
    ) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::init_with_hasher(config, listener, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with the specified capacity and hash
    /// builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(LfuCacheConfig::new(cap), None, hash_builder)
    }

    /// Creates a new LFU cache from a configuration, optional discard
    /// listener, and hash builder.
    pub fn init_with_hasher(
        config: LfuCacheConfig,
        listener: Option<SharedListener<K, V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: LfuSegment::with_hasher(config, listener, hash_builder),
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
    /// A hit bumps the entry's touch frequency and recency stamp.
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
    /// bumping the entry's touch frequency and recency stamp.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns `true` if the cache holds a value for `key`, without touching
    /// metrics, frequency, or recency state.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone + 'static, V: 'static, S: BuildHasher> LfuCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key was already present, the value is overwritten, the
    /// entry's frequency is bumped, and `Some((key, old_value))` is
    /// returned. Otherwise, if the cache is at capacity, the least
    /// frequently used entry (oldest touch on a tie) is evicted and
    /// returned. A freshly inserted entry starts at frequency 1.
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

    /// Removes and returns the current eviction candidate (the least
    /// frequently used entry, oldest touch on a tie).
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

impl<K: Hash + Eq + 'static, V: 'static, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
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
    fn test_lfu_evicts_least_frequent() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lfu_tie_breaks_toward_oldest_touch() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        // Both at frequency 1: the older insertion loses.
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        let metrics = cache.metrics();
        assert_eq!(metrics.get("tie_break_evictions"), Some(&1.0));
    }

    #[test]
    fn test_lfu_recent_touch_wins_a_tie() {
        let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"b");
        cache.get(&"c");
        cache.get(&"a");
        cache.get(&"b");
        cache.get(&"c");
        cache.get(&"a");
        // All three reach frequency 3; "b" has the oldest last touch.
        assert_eq!(cache.put("d", 4), Some(("b", 2)));
    }

    #[test]
    fn test_lfu_overwrite_bumps_frequency() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        // Overwriting "a" lifts it to frequency 2; "b" stays at 1.
        assert_eq!(cache.put("a", 10), Some(("a", 1)));
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn test_lfu_new_entry_starts_at_frequency_one() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"a");
        cache.put("b", 2);
        // "b" was just inserted at frequency 1 and is the victim despite
        // being the most recent arrival.
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&1));
    }

    #[test]
    fn test_lfu_get_mut_counts_as_touch() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        if let Some(value) = cache.get_mut(&"a") {
            *value = 10;
        }
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn test_lfu_contains_key_is_not_a_touch() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.contains_key(&"a"));
        assert!(cache.contains_key(&"a"));
        // "a" is still at frequency 1 with the older stamp.
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_lfu_remove() {
        let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");
        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);
        assert_eq!(cache.len(), 2);
        cache.put("d", 4);
        // "c" and "d" tie at frequency 1; "c" is older.
        assert_eq!(cache.put("e", 5), Some(("c", 3)));
    }

    #[test]
    fn test_lfu_pop_drains_in_frequency_order() {
        let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"b");
        cache.get(&"b");
        cache.get(&"c");
        assert_eq!(cache.pop(), Some(("a", 1)));
        assert_eq!(cache.pop(), Some(("c", 3)));
        assert_eq!(cache.pop(), Some(("b", 2)));
        assert_eq!(cache.pop(), None);
    }

    #[test]
    fn test_lfu_discard_listener() {
        let discarded: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&discarded);
        let mut cache = LfuCache::init(
            LfuCacheConfig::new(NonZeroUsize::new(2).unwrap()),
            Some(Arc::new(FnListener(move |key: &&'static str, _: &i32| {
                log.lock().unwrap().push(*key);
            }))),
        );
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);
        assert_eq!(*discarded.lock().unwrap(), ["b"]);
        // pop and remove do not notify.
        cache.pop();
        cache.remove(&"a");
        assert_eq!(discarded.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_lfu_put_opt_noop() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        assert_eq!(cache.put_opt(None, Some(2)), None);
        assert_eq!(cache.put_opt(Some("b"), None), None);
        assert_eq!(cache.len(), 1);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("noop_puts"), Some(&2.0));
    }

    #[test]
    fn test_lfu_size_bound_under_churn() {
        let mut cache = LfuCache::new(NonZeroUsize::new(8).unwrap());
        for i in 0..1000 {
            cache.put(i % 20, i);
            cache.get(&(i % 5));
            assert!(cache.len() <= 8);
        }
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"missing");
        cache.put("c", 3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&2.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("peak_frequency"), Some(&3.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }

    #[test]
    fn test_lfu_clear_resets_state() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.get(&"a");
        cache.clear();
        assert!(cache.is_empty());
        cache.put("b", 2);
        cache.put("c", 3);
        // Fresh entries after clear tie at frequency 1.
        assert_eq!(cache.put("d", 4), Some(("b", 2)));
    }
}
