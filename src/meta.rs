//! Algorithm-Specific Metadata Types
//!
//! Per-entry bookkeeping carried by the eviction trackers. Only LFU needs
//! per-entry metadata; the other policies encode their state positionally
//! (FIFO/MRU in the order list, LIFO in a single cache-level pointer).
//!
//! | Algorithm | Metadata Type | Description |
//! |-----------|---------------|-------------|
//! | Basic     | `()` (none)   | No eviction, nothing to track |
//! | FIFO      | `()` (none)   | Position in the order list is implicit |
//! | LIFO      | `()` (none)   | Last-insert pointer is cache-global |
//! | MRU       | `()` (none)   | Position in the recency list is implicit |
//! | LFU       | `LfuMeta`     | Touch frequency + last-touch stamp |

/// Metadata for LFU cache entries.
///
/// Tracks how often an entry has been touched (inserted or read) and the
/// logical-clock stamp of the most recent touch. The stamp breaks frequency
/// ties: among the keys sharing the minimum frequency, the one with the
/// oldest stamp is the eviction victim.
///
/// Stamps come from a cache-global monotonically increasing counter, so no
/// two entries in the same cache ever share a `(frequency, last_touch)`
/// pair.
///
/// # Examples
///
/// ```
/// use policy_cache::meta::LfuMeta;
///
/// let mut meta = LfuMeta::first_touch(0);
/// assert_eq!(meta.frequency, 1);
/// assert_eq!(meta.last_touch, 0);
///
/// meta.touch(7);
/// assert_eq!(meta.frequency, 2);
/// assert_eq!(meta.last_touch, 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LfuMeta {
    /// Total touches (inserts + reads) since this key was last inserted.
    pub frequency: u64,
    /// Logical-clock stamp of the most recent touch.
    pub last_touch: u64,
}

impl LfuMeta {
    /// Creates metadata for a freshly inserted entry: frequency 1, stamped
    /// with the insertion time.
    #[inline]
    pub fn first_touch(stamp: u64) -> Self {
        Self {
            frequency: 1,
            last_touch: stamp,
        }
    }

    /// Records another touch: increments the frequency and refreshes the
    /// stamp.
    #[inline]
    pub fn touch(&mut self, stamp: u64) {
        self.frequency += 1;
        self.last_touch = stamp;
    }

    /// The (frequency, stamp) pair this entry sorts by in the priority
    /// index. Smallest sorts first: minimum frequency, then oldest stamp.
    #[inline]
    pub fn rank(&self) -> (u64, u64) {
        (self.frequency, self.last_touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_touch() {
        let meta = LfuMeta::first_touch(42);
        assert_eq!(meta.frequency, 1);
        assert_eq!(meta.last_touch, 42);
        assert_eq!(meta.rank(), (1, 42));
    }

    #[test]
    fn test_touch_increments_and_restamps() {
        let mut meta = LfuMeta::first_touch(1);
        meta.touch(5);
        meta.touch(9);
        assert_eq!(meta.frequency, 3);
        assert_eq!(meta.last_touch, 9);
    }

    #[test]
    fn test_rank_orders_frequency_before_recency() {
        let cold_old = LfuMeta {
            frequency: 1,
            last_touch: 0,
        };
        let cold_new = LfuMeta {
            frequency: 1,
            last_touch: 10,
        };
        let hot_old = LfuMeta {
            frequency: 5,
            last_touch: 0,
        };
        assert!(cold_old.rank() < cold_new.rank());
        assert!(cold_new.rank() < hot_old.rank());
    }
}
