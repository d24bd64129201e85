//! Concurrent Cache Implementations
//!
//! Thread-safe counterparts to the single-threaded caches, available with
//! the `concurrent` feature.
//!
//! # Architecture
//!
//! Each concurrent cache wraps one policy segment in a single
//! `parking_lot::Mutex`. Every operation takes the lock, mutates the
//! segment, and releases it before returning.
//!
//! ## Why One Lock Instead of Sharding?
//!
//! Sharded designs scale better but maintain their eviction order
//! per-shard, so the globally oldest (FIFO), newest (LIFO/MRU), or least
//! frequent (LFU) entry is no longer the guaranteed victim. These policies
//! are only meaningful with a single global order, so the concurrent
//! variants trade throughput for exactness and serialize on one lock.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Reads are writes here: an MRU `get` reorders the recency list and an
//! LFU `get` bumps a frequency, and even the policies whose `get` has no
//! ordering effect still record hit and miss counters. With no read-only
//! fast path an `RwLock` would degenerate to its write lock, so the
//! cheaper `Mutex` is used.
//!
//! # Available Concurrent Caches
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConcurrentBasicCache`] | Thread-safe unbounded baseline |
//! | [`ConcurrentFifoCache`] | Thread-safe FIFO cache |
//! | [`ConcurrentLifoCache`] | Thread-safe LIFO cache |
//! | [`ConcurrentMruCache`] | Thread-safe MRU cache |
//! | [`ConcurrentLfuCache`] | Thread-safe LFU cache |
//!
//! # Value Cloning
//!
//! `get` returns a **clone** of the value so the lock is released before
//! the caller touches it. Use `get_with` to borrow the value under the
//! lock instead.
//!
//! # Thread Safety
//!
//! All concurrent cache types are `Send + Sync` and are usually shared via
//! `Arc`. Discard listeners run while the lock is held; a listener that
//! calls back into the same cache will deadlock.
//!
//! # Example
//!
//! ```rust,ignore
//! use policy_cache::concurrent::ConcurrentFifoCache;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentFifoCache::new(NonZeroUsize::new(1000).unwrap()));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..1000 {
//!             cache.put(format!("key-{t}-{i}"), i);
//!             let _ = cache.get(&format!("key-{t}-{i}"));
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

extern crate alloc;

use crate::basic::BasicSegment;
use crate::config::{
    BasicCacheConfig, FifoCacheConfig, LfuCacheConfig, LifoCacheConfig, MruCacheConfig,
};
use crate::fifo::FifoSegment;
use crate::lfu::LfuSegment;
use crate::lifo::LifoSegment;
use crate::listener::SharedListener;
use crate::metrics::CacheMetrics;
use crate::mru::MruSegment;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

macro_rules! bounded_concurrent_cache {
    (
        $(#[$outer:meta])*
        $name:ident, $segment:ident, $config:ident, $candidate:literal
    ) => {
        $(#[$outer])*
        pub struct $name<K, V, S = DefaultHashBuilder> {
            segment: Mutex<$segment<K, V, S>>,
        }

        impl<K, V> $name<K, V, DefaultHashBuilder>
        where
            K: Hash + Eq + Clone + Send + 'static,
            V: Clone + Send + 'static,
        {
            /// Creates a new cache with the specified capacity and no
            /// discard listener.
            pub fn new(cap: NonZeroUsize) -> Self {
                Self::init($config::new(cap), None)
            }

            /// Creates a new cache from a configuration and an optional
            /// discard listener.
            ///
            /// The listener runs under the cache lock on every capacity
            /// eviction, before the triggering `put` returns.
            pub fn init(config: $config, listener: Option<SharedListener<K, V>>) -> Self {
                Self::init_with_hasher(config, listener, DefaultHashBuilder::default())
            }
        }

        impl<K, V, S> $name<K, V, S>
        where
            K: Hash + Eq + Clone + Send + 'static,
            V: Clone + Send + 'static,
            S: BuildHasher + Send,
        {
            /// Creates a new cache from a configuration, optional discard
            /// listener, and hash builder.
            pub fn init_with_hasher(
                config: $config,
                listener: Option<SharedListener<K, V>>,
                hash_builder: S,
            ) -> Self {
                Self {
                    segment: Mutex::new($segment::with_hasher(config, listener, hash_builder)),
                }
            }

            /// Returns the maximum number of key-value pairs the cache can
            /// hold.
            pub fn cap(&self) -> NonZeroUsize {
                self.segment.lock().cap()
            }

            /// Returns the current number of key-value pairs in the cache.
            pub fn len(&self) -> usize {
                self.segment.lock().len()
            }

            /// Returns `true` if the cache contains no key-value pairs.
            pub fn is_empty(&self) -> bool {
                self.segment.lock().is_empty()
            }

            /// Retrieves a clone of the value for `key`, touching the entry
            /// the same way the single-threaded `get` does.
            pub fn get<Q>(&self, key: &Q) -> Option<V>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.segment.lock().get(key).cloned()
            }

            /// Nullable lookup boundary: `None` keys are defined to be not
            /// found.
            pub fn get_opt<Q>(&self, key: Option<&Q>) -> Option<V>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.segment.lock().get(key?).cloned()
            }

            /// Applies `f` to the value for `key` while holding the lock,
            /// avoiding a clone.
            pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
                F: FnOnce(&V) -> R,
            {
                self.segment.lock().get(key).map(f)
            }

            /// Applies `f` to a mutable reference to the value for `key`
            /// while holding the lock.
            pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
                F: FnOnce(&mut V) -> R,
            {
                self.segment.lock().get_mut(key).map(f)
            }

            /// Returns `true` if the cache holds a value for `key`, without
            /// touching metrics or any ordering state.
            pub fn contains_key<Q>(&self, key: &Q) -> bool
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.segment.lock().contains_key(key)
            }

            /// Inserts a key-value pair, with the same overwrite and
            /// eviction contract as the single-threaded `put`.
            pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
                self.segment.lock().put(key, value)
            }

            /// Nullable insertion boundary: if either the key or the value
            /// is absent, nothing happens (recorded as a `noop_put`).
            pub fn put_opt(&self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
                let mut segment = self.segment.lock();
                match (key, value) {
                    (Some(key), Some(value)) => segment.put(key, value),
                    _ => {
                        segment.record_noop_put();
                        None
                    }
                }
            }

            /// Removes a key from the cache, returning its value if
            /// present. The discard listener does not fire.
            pub fn remove<Q>(&self, key: &Q) -> Option<V>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.segment.lock().remove(key)
            }

            #[doc = concat!("Removes and returns the current eviction candidate (", $candidate, ").")]
            pub fn pop(&self) -> Option<(K, V)> {
                self.segment.lock().pop()
            }

            /// Clears the cache, removing all key-value pairs.
            pub fn clear(&self) {
                self.segment.lock().clear()
            }
        }

        impl<K, V, S> CacheMetrics for $name<K, V, S>
        where
            K: Hash + Eq + Clone + Send + 'static,
            V: Clone + Send + 'static,
            S: BuildHasher + Send,
        {
            fn metrics(&self) -> BTreeMap<String, f64> {
                self.segment.lock().metrics().metrics()
            }

            fn algorithm_name(&self) -> &'static str {
                self.segment.lock().metrics().algorithm_name()
            }
        }

        impl<K, V, S> core::fmt::Debug for $name<K, V, S> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

bounded_concurrent_cache!(
    /// A thread-safe FIFO cache behind a single lock.
    ///
    /// Behaves exactly like [`FifoCache`](crate::FifoCache) with every
    /// operation serialized, so the globally oldest insertion is always the
    /// victim.
    ConcurrentFifoCache,
    FifoSegment,
    FifoCacheConfig,
    "the oldest insertion"
);

bounded_concurrent_cache!(
    /// A thread-safe LIFO cache behind a single lock.
    ///
    /// Behaves exactly like [`LifoCache`](crate::LifoCache) with every
    /// operation serialized, so the latest insertion is always the victim.
    ConcurrentLifoCache,
    LifoSegment,
    LifoCacheConfig,
    "the latest insertion"
);

bounded_concurrent_cache!(
    /// A thread-safe MRU cache behind a single lock.
    ///
    /// Behaves exactly like [`MruCache`](crate::MruCache) with every
    /// operation serialized, so the globally most recent touch is always
    /// the victim.
    ConcurrentMruCache,
    MruSegment,
    MruCacheConfig,
    "the most recently touched entry"
);

bounded_concurrent_cache!(
    /// A thread-safe LFU cache behind a single lock.
    ///
    /// Behaves exactly like [`LfuCache`](crate::LfuCache) with every
    /// operation serialized, so the globally least frequent entry is always
    /// the victim.
    ConcurrentLfuCache,
    LfuSegment,
    LfuCacheConfig,
    "the least frequently used entry"
);

/// A thread-safe unbounded cache behind a single lock.
///
/// The concurrent counterpart to [`BasicCache`](crate::BasicCache). There
/// is no capacity, no eviction, and no discard listener.
pub struct ConcurrentBasicCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<BasicSegment<K, V, S>>,
}

impl<K, V> ConcurrentBasicCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates an empty unbounded cache.
    pub fn new() -> Self {
        Self::init(BasicCacheConfig::default())
    }

    /// Creates an unbounded cache from a configuration.
    pub fn init(config: BasicCacheConfig) -> Self {
        Self::init_with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ConcurrentBasicCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ConcurrentBasicCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    /// Creates an unbounded cache from a configuration and hash builder.
    pub fn init_with_hasher(config: BasicCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(BasicSegment::with_hasher(config, hash_builder)),
        }
    }

    /// Returns the current number of key-value pairs in the cache.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Retrieves a clone of the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Nullable lookup boundary: `None` keys are defined to be not found.
    pub fn get_opt<Q>(&self, key: Option<&Q>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().get(key?).cloned()
    }

    /// Applies `f` to the value for `key` while holding the lock, avoiding
    /// a clone.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value for `key` while
    /// holding the lock.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.segment.lock().get_mut(key).map(f)
    }

    /// Returns `true` if the cache holds a value for `key`, without
    /// touching metrics.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains_key(key)
    }

    /// Inserts a key-value pair, overwriting unconditionally.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.segment.lock().put(key, value)
    }

    /// Nullable insertion boundary: if either the key or the value is
    /// absent, nothing happens (recorded as a `noop_put`).
    pub fn put_opt(&self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        let mut segment = self.segment.lock();
        match (key, value) {
            (Some(key), Some(value)) => segment.put(key, value),
            _ => {
                segment.record_noop_put();
                None
            }
        }
    }

    /// Removes a key from the cache, returning its value if present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Clears the cache, removing all key-value pairs.
    pub fn clear(&self) {
        self.segment.lock().clear()
    }
}

impl<K, V, S> CacheMetrics for ConcurrentBasicCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.lock().metrics().algorithm_name()
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentBasicCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentBasicCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::thread;

    #[test]
    fn test_concurrent_fifo_shared_across_threads() {
        let cache = Arc::new(ConcurrentFifoCache::new(NonZeroUsize::new(64).unwrap()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        cache.put(format!("key-{t}-{i}"), i);
                        let _ = cache.get(&format!("key-{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
    }

    #[test]
    fn test_concurrent_fifo_global_order() {
        let cache = ConcurrentFifoCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_concurrent_lifo_global_order() {
        let cache = ConcurrentLifoCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn test_concurrent_mru_get_marks_victim() {
        let cache = ConcurrentMruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_concurrent_lfu_evicts_least_frequent() {
        let cache = ConcurrentLfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
    }

    #[test]
    fn test_concurrent_basic_counters_under_contention() {
        let cache = Arc::new(ConcurrentBasicCache::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..250 {
                        cache.put(format!("key-{t}-{i}"), i);
                        let _ = cache.get(&format!("key-{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1000);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1000.0));
        assert_eq!(metrics.get("insertions"), Some(&1000.0));
    }

    #[test]
    fn test_concurrent_get_with_avoids_clone() {
        let cache = ConcurrentFifoCache::new(NonZeroUsize::new(4).unwrap());
        cache.put("a".to_string(), "payload".to_string());
        let len = cache.get_with(&"a".to_string(), |value| value.len());
        assert_eq!(len, Some(7));
        cache.get_mut_with(&"a".to_string(), |value| value.push('!'));
        assert_eq!(cache.get(&"a".to_string()), Some("payload!".to_string()));
    }
}
