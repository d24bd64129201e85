//! Cache Configuration Module
//!
//! Configuration structures for all cache variants. Each cache type has its
//! own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No builder methods needed
//!
//! Capacity is construction-time state, never mutated at runtime, so
//! multiple independently configured caches can coexist in one process.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `BasicCacheConfig` | [`BasicCache`](crate::BasicCache) | Unbounded baseline |
//! | `FifoCacheConfig` | [`FifoCache`](crate::FifoCache) | First-In-First-Out |
//! | `LifoCacheConfig` | [`LifoCache`](crate::LifoCache) | Last-In-First-Out |
//! | `MruCacheConfig` | [`MruCache`](crate::MruCache) | Most Recently Used |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used, LRU tie-break |
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::FifoCacheConfig;
//! use policy_cache::FifoCache;
//! use core::num::NonZeroUsize;
//!
//! let config = FifoCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: FifoCache<String, i32> = FifoCache::init(config, None);
//! ```

pub mod basic;
pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod mru;

// Re-exports for convenience
pub use basic::BasicCacheConfig;
pub use fifo::FifoCacheConfig;
pub use lfu::LfuCacheConfig;
pub use lifo::LifoCacheConfig;
pub use mru::MruCacheConfig;
