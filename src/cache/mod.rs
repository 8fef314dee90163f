//! LRU cache for kernel values
//!
//! The dual-form decision function re-evaluates K(i, k) for every non-zero
//! alpha on every candidacy check, so the solver memoizes pairwise kernel
//! values between updates. Kernel matrices are symmetric; entries are keyed
//! with i <= j.

use crate::core::Result;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached entries used by the solver
pub const DEFAULT_CACHE_ENTRIES: usize = 1 << 20;

/// LRU cache over symmetric kernel-matrix entries
pub struct KernelCache {
    entries: LruCache<(usize, usize), f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Create a cache holding up to `capacity` kernel values
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Fetch K(i, j), computing and storing it on a miss
    pub fn get_or_compute<F>(&mut self, i: usize, j: usize, compute: F) -> Result<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        let key = if i <= j { (i, j) } else { (j, i) };
        if let Some(&value) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(value);
        }
        self.misses += 1;
        let value = compute()?;
        self.entries.put(key, value);
        Ok(value)
    }

    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Drop all entries and reset counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
