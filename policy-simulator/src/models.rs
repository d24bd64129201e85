// Data models for the policy simulation

use serde::Serialize;
use std::fmt;

/// Cache policies supported for simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CachePolicy {
    Basic,
    Fifo,
    Lifo,
    Mru,
    Lfu,
    /// LRU baseline from the `lru` crate, for comparison
    LruBaseline,
}

impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Basic => "Basic",
            CachePolicy::Fifo => "FIFO",
            CachePolicy::Lifo => "LIFO",
            CachePolicy::Mru => "MRU",
            CachePolicy::Lfu => "LFU",
            CachePolicy::LruBaseline => "LRU (lru crate)",
        }
    }

    /// All policies, in report order
    pub fn all() -> Vec<CachePolicy> {
        vec![
            CachePolicy::Basic,
            CachePolicy::Fifo,
            CachePolicy::Lifo,
            CachePolicy::Mru,
            CachePolicy::Lfu,
            CachePolicy::LruBaseline,
        ]
    }

    /// Parses a policy name as given on the command line
    pub fn parse(name: &str) -> Option<CachePolicy> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Some(CachePolicy::Basic),
            "fifo" => Some(CachePolicy::Fifo),
            "lifo" => Some(CachePolicy::Lifo),
            "mru" => Some(CachePolicy::Mru),
            "lfu" => Some(CachePolicy::Lfu),
            "lru" => Some(CachePolicy::LruBaseline),
            _ => None,
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key distribution shapes for the synthetic workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Every object equally likely
    Uniform,
    /// Zipf-distributed popularity with a configurable exponent
    Zipf,
    /// A small hot set takes most of the traffic, the rest is uniform
    HotSet,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Zipf => "zipf",
            Distribution::HotSet => "hotset",
        }
    }

    pub fn parse(name: &str) -> Option<Distribution> {
        match name.to_ascii_lowercase().as_str() {
            "uniform" => Some(Distribution::Uniform),
            "zipf" => Some(Distribution::Zipf),
            "hotset" => Some(Distribution::HotSet),
            _ => None,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-policy outcome of one simulation run
#[derive(Debug, Clone, Default)]
pub struct PolicyStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub discard_notifications: u64,
    pub simulation_time_ms: u64,
}

impl PolicyStats {
    pub fn hit_rate(&self) -> f64 {
        let requests = self.hits + self.misses;
        if requests == 0 {
            0.0
        } else {
            self.hits as f64 / requests as f64
        }
    }
}

/// One row of the CSV export
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub distribution: String,
    pub capacity: usize,
    pub objects: usize,
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub simulation_time_ms: u64,
}
