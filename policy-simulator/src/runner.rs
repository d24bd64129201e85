// Trace replay against each cache policy

use crate::models::{CachePolicy, PolicyStats};
use ahash::RandomState;
use policy_cache::config::{
    BasicCacheConfig, FifoCacheConfig, LfuCacheConfig, LifoCacheConfig, MruCacheConfig,
};
use policy_cache::{
    BasicCache, CacheMetrics, FifoCache, FnListener, LfuCache, LifoCache, MruCache, SharedListener,
};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Settings shared by every policy run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Capacity of each bounded cache
    pub capacity: NonZeroUsize,
    /// Print a `DISCARD:` line for every capacity eviction
    pub print_discards: bool,
}

/// Builds the discard listener used for every bounded policy run.
///
/// The listener counts notifications and optionally echoes each victim,
/// which doubles as a demonstration of the notification hook.
fn make_listener(
    config: &RunConfig,
    policy: CachePolicy,
) -> (Arc<AtomicU64>, SharedListener<String, u32>) {
    let counter = Arc::new(AtomicU64::new(0));
    let count = Arc::clone(&counter);
    let print_discards = config.print_discards;
    let listener = Arc::new(FnListener(move |key: &String, _value: &u32| {
        count.fetch_add(1, Ordering::Relaxed);
        if print_discards {
            println!("DISCARD [{}]: {key}", policy.as_str());
        }
    }));
    (counter, listener)
}

/// Replays `trace` against `policy` and reports the outcome.
pub fn run_policy(policy: CachePolicy, trace: &[String], config: &RunConfig) -> PolicyStats {
    let mut stats = PolicyStats::default();
    let start = Instant::now();

    // Replays the miss-then-fill loop shared by every policy: a read per
    // request, an insertion per miss.
    macro_rules! replay {
        ($cache:ident) => {
            for key in trace {
                if $cache.get(key).is_some() {
                    stats.hits += 1;
                } else {
                    stats.misses += 1;
                    $cache.put(key.clone(), 1u32);
                }
            }
        };
    }

    match policy {
        CachePolicy::Basic => {
            let mut cache: BasicCache<String, u32, RandomState> =
                BasicCache::init_with_hasher(BasicCacheConfig::default(), RandomState::new());
            replay!(cache);
        }
        CachePolicy::Fifo => {
            let (discards, listener) = make_listener(config, policy);
            let mut cache = FifoCache::init_with_hasher(
                FifoCacheConfig::new(config.capacity),
                Some(listener),
                RandomState::new(),
            );
            replay!(cache);
            stats.evictions = eviction_count(&cache);
            stats.discard_notifications = discards.load(Ordering::Relaxed);
        }
        CachePolicy::Lifo => {
            let (discards, listener) = make_listener(config, policy);
            let mut cache = LifoCache::init_with_hasher(
                LifoCacheConfig::new(config.capacity),
                Some(listener),
                RandomState::new(),
            );
            replay!(cache);
            stats.evictions = eviction_count(&cache);
            stats.discard_notifications = discards.load(Ordering::Relaxed);
        }
        CachePolicy::Mru => {
            let (discards, listener) = make_listener(config, policy);
            let mut cache = MruCache::init_with_hasher(
                MruCacheConfig::new(config.capacity),
                Some(listener),
                RandomState::new(),
            );
            replay!(cache);
            stats.evictions = eviction_count(&cache);
            stats.discard_notifications = discards.load(Ordering::Relaxed);
        }
        CachePolicy::Lfu => {
            let (discards, listener) = make_listener(config, policy);
            let mut cache = LfuCache::init_with_hasher(
                LfuCacheConfig::new(config.capacity),
                Some(listener),
                RandomState::new(),
            );
            replay!(cache);
            stats.evictions = eviction_count(&cache);
            stats.discard_notifications = discards.load(Ordering::Relaxed);
        }
        CachePolicy::LruBaseline => {
            let mut cache: lru::LruCache<String, u32> = lru::LruCache::new(config.capacity);
            for key in trace {
                if cache.get(key).is_some() {
                    stats.hits += 1;
                } else {
                    stats.misses += 1;
                    if cache.len() == config.capacity.get() {
                        stats.evictions += 1;
                    }
                    cache.put(key.clone(), 1u32);
                }
            }
        }
    }

    stats.simulation_time_ms = start.elapsed().as_millis() as u64;
    stats
}

fn eviction_count<C: CacheMetrics>(cache: &C) -> u64 {
    cache
        .metrics()
        .get("evictions")
        .copied()
        .unwrap_or_default() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::WorkloadSpec;
    use crate::models::Distribution;

    fn trace() -> Vec<String> {
        WorkloadSpec {
            requests: 5_000,
            objects: 200,
            distribution: Distribution::Zipf,
            zipf_exponent: 1.0,
            hot_traffic: 0.8,
            hot_objects: 0.2,
            seed: 7,
        }
        .generate()
    }

    fn config() -> RunConfig {
        RunConfig {
            capacity: NonZeroUsize::new(50).unwrap(),
            print_discards: false,
        }
    }

    #[test]
    fn test_every_request_is_accounted_for() {
        let trace = trace();
        for policy in CachePolicy::all() {
            let stats = run_policy(policy, &trace, &config());
            assert_eq!(stats.hits + stats.misses, trace.len() as u64, "{policy}");
        }
    }

    #[test]
    fn test_basic_misses_once_per_object() {
        let trace = trace();
        let stats = run_policy(CachePolicy::Basic, &trace, &config());
        // The unbounded store misses exactly once per distinct key.
        assert!(stats.misses <= 200);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_notifications_match_evictions() {
        let trace = trace();
        for policy in [
            CachePolicy::Fifo,
            CachePolicy::Lifo,
            CachePolicy::Mru,
            CachePolicy::Lfu,
        ] {
            let stats = run_policy(policy, &trace, &config());
            assert_eq!(stats.evictions, stats.discard_notifications, "{policy}");
            assert!(stats.evictions > 0, "{policy}");
        }
    }

    #[test]
    fn test_lfu_beats_mru_on_skewed_traffic() {
        let trace = trace();
        let lfu = run_policy(CachePolicy::Lfu, &trace, &config());
        let mru = run_policy(CachePolicy::Mru, &trace, &config());
        assert!(lfu.hit_rate() > mru.hit_rate());
    }
}
