#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! This section provides quick code examples and API references for each
//! cache policy.
//!
//! ## Quick Reference
//!
//! | Policy | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`BasicCache`] | Unbounded, no eviction | Baselines, small bounded key sets |
//! | [`FifoCache`] | First-In-First-Out | Age-driven staleness, predictable eviction |
//! | [`LifoCache`] | Last-In-First-Out | Pinning early entries through churny tails |
//! | [`MruCache`] | Most-Recently-Used | Cyclic scans larger than the cache |
//! | [`LfuCache`] | Least-Frequently-Used | Skewed workloads with a stable popular set |
//!
//! ## Performance Characteristics
//!
//! | Policy | Get | Put | Remove | Tracker State |
//! |--------|-----|-----|--------|---------------|
//! | Basic  | O(1)| O(1)| O(1)   | none |
//! | FIFO   | O(1)| O(1)| O(1)   | insertion-order list |
//! | LIFO   | O(1)| O(1)| O(1)   | single latest-insert key |
//! | MRU    | O(1)| O(1)| O(1)   | recency list |
//! | LFU    | O(log n) | O(log n) | O(log n) | frequency-ordered index |
//!
//! ## Uniform Operations
//!
//! Every cache answers the same surface: `put` (returning the replaced or
//! evicted pair), `get`/`get_mut` (a hit is a policy touch where the policy
//! defines one), `contains_key` (never a touch), `remove`, `clear`, `len`,
//! and `is_empty`. The bounded caches add `cap`, `pop` (remove the current
//! eviction candidate), and an optional [`DiscardListener`] that observes
//! every capacity eviction. The nullable boundary `put_opt`/`get_opt`
//! treats absent keys or values as no-ops.
//!
//! ## Example
//!
//! ```
//! use policy_cache::{CacheMetrics, LfuCache};
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LfuCache::new(NonZeroUsize::new(100).unwrap());
//! cache.put("user:1", "alice");
//! cache.put("user:2", "bob");
//! assert_eq!(cache.get(&"user:1"), Some(&"alice"));
//!
//! let report = cache.metrics();
//! assert_eq!(report.get("cache_hits"), Some(&1.0));
//! ```
#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Policy metadata types.
///
/// Provides the per-entry bookkeeping the policies attach to cached values,
/// currently the frequency and recency stamp pair used by LFU.
pub mod meta;

/// Order-tracking list used by the FIFO and MRU policies.
///
/// This module is internal infrastructure and is not part of the public
/// API. It stores entries in a slot arena and links them by index, so no
/// raw pointers are involved. Use the high-level cache implementations
/// instead.
pub(crate) mod list;

/// Discard notification interface.
///
/// Provides the [`DiscardListener`] trait, the [`FnListener`] closure
/// adapter, and the [`SharedListener`] alias the bounded caches accept at
/// construction.
pub mod listener;

/// Cache configuration structures.
///
/// Provides configuration structures for all cache policy implementations.
pub mod config;

/// Unbounded baseline cache implementation.
///
/// Provides a plain key-value store with no capacity limit and no
/// eviction, sharing the uniform cache surface.
pub mod basic;

/// First-In-First-Out (FIFO) cache implementation.
///
/// Provides a fixed-size cache that evicts entries in their original
/// insertion order. Reads and overwrites never renew an entry's position.
pub mod fifo;

/// Last-In-First-Out (LIFO) cache implementation.
///
/// Provides a fixed-size cache that evicts the most recently inserted
/// entry, pinning older entries in place.
pub mod lifo;

/// Most-Recently-Used (MRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the entry touched last, which
/// protects cold entries during scans.
pub mod mru;

/// Least-Frequently-Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the entry with the fewest
/// touches, breaking frequency ties toward the oldest last touch.
pub mod lfu;

/// Cache metrics system.
///
/// Provides a count-based metrics collection and reporting system for all
/// cache policies. Each policy tracks a common core of counters and may add
/// policy-specific ones behind the same reporting interface.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Provides thread-safe cache implementations, each wrapping one policy
/// segment in a single lock so the policy's global eviction order is
/// preserved exactly.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export cache types
pub use basic::BasicCache;
pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lifo::LifoCache;
pub use mru::MruCache;

// Re-export metadata types
pub use meta::LfuMeta;

// Re-export the notification interface
pub use listener::{DiscardListener, FnListener, SharedListener};

// Re-export the metrics interface
pub use metrics::CacheMetrics;

#[cfg(feature = "concurrent")]
pub use concurrent::{
    ConcurrentBasicCache, ConcurrentFifoCache, ConcurrentLfuCache, ConcurrentLifoCache,
    ConcurrentMruCache,
};
