//! Discard notification — a callback invoked whenever a cache evicts an
//! entry to make room for a new one.
//!
//! Every bounded cache accepts an optional listener at construction time.
//! When a `put` of a new key overflows the capacity, the policy selects a
//! victim, removes it from the store and the tracker, and invokes the
//! listener with the victim's key and value before `put` returns. Exactly
//! one notification is emitted per eviction.
//!
//! Explicit removals (`remove`, `pop`, `clear`) do not notify: the removed
//! entry is handed back to the caller directly.
//!
//! The listener is a pure side effect. It receives shared references and
//! has no way to feed back into the cache's own state; do not attempt to
//! re-enter the cache from inside the callback.
//!
//! # Example
//!
//! ```
//! use policy_cache::FifoCache;
//! use policy_cache::config::FifoCacheConfig;
//! use policy_cache::listener::FnListener;
//! use std::sync::Arc;
//! use std::num::NonZeroUsize;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let discards = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&discards);
//!
//! let config = FifoCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = FifoCache::init(
//!     config,
//!     Some(Arc::new(FnListener(move |_key: &&str, _value: &i32| {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     }))),
//! );
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3); // evicts "a", fires the listener
//! assert_eq!(discards.load(Ordering::Relaxed), 1);
//! ```

extern crate alloc;

use alloc::sync::Arc;

/// A callback invoked each time a cache evicts an entry on overflow.
///
/// Implementations must be `Send + Sync + 'static` so a listener can be
/// shared between a cache and the code observing it (tests, logging,
/// metrics) via `Arc`, including across the `concurrent` wrappers.
pub trait DiscardListener<K, V>: Send + Sync + 'static {
    /// Called with the evicted key and value, after the entry has left the
    /// cache and before the triggering `put` returns.
    fn on_discard(&self, key: &K, value: &V);
}

/// A [`DiscardListener`] backed by a closure.
///
/// ```
/// use policy_cache::listener::{DiscardListener, FnListener};
///
/// let listener = FnListener(|key: &u32, _value: &u32| {
///     let _ = key;
/// });
/// listener.on_discard(&1, &10);
/// ```
#[derive(Debug)]
pub struct FnListener<F>(pub F);

impl<K, V, F> DiscardListener<K, V> for FnListener<F>
where
    F: Fn(&K, &V) + Send + Sync + 'static,
{
    fn on_discard(&self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

/// Shared handle to a discard listener, as accepted by every bounded cache's
/// `init` constructor.
pub type SharedListener<K, V> = Arc<dyn DiscardListener<K, V>>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fn_listener_invokes_closure() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let listener = FnListener(|_key: &u32, _value: &u32| {
            CALLS.fetch_add(1, Ordering::Relaxed);
        });
        listener.on_discard(&1, &2);
        listener.on_discard(&3, &4);
        assert_eq!(CALLS.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_shared_listener_is_object_safe() {
        let listener: SharedListener<u32, u32> =
            Arc::new(FnListener(|_: &u32, _: &u32| {}));
        let listeners: Vec<SharedListener<u32, u32>> =
            alloc::vec![Arc::clone(&listener), listener];
        for l in &listeners {
            l.on_discard(&0, &0);
        }
    }
}
