use crate::analysis::color::Color;
use crate::io::configuration::CACHE_SHARD_COUNT;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// Memoization cache from query colors to chosen tile slots
///
/// Split into independently locked shards so concurrent lookups on different
/// colors rarely contend. A slot is computed outside any lock; when two
/// threads miss on the same color, the first insert wins and both callers
/// receive the stored slot.
pub struct MatchCache {
    shards: Vec<RwLock<HashMap<Color, usize>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Snapshot of cache effectiveness
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::with_shards(CACHE_SHARD_COUNT)
    }

    /// Create an empty cache with a specific shard count (at least one)
    pub fn with_shards(shard_count: usize) -> Self {
        Self {
            shards: (0..shard_count.max(1))
                .map(|_| RwLock::new(HashMap::new()))
                .collect(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn shard(&self, key: Color) -> Option<&RwLock<HashMap<Color, usize>>> {
        let mixed = usize::from(key.r) ^ (usize::from(key.g) << 3) ^ (usize::from(key.b) << 6);
        self.shards.get(mixed % self.shards.len())
    }

    /// Cached slot for `key`, if any
    pub fn get(&self, key: Color) -> Option<usize> {
        let shard = self.shard(key)?;
        let map = shard.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&key).copied()
    }

    /// Retrieve the cached slot or compute and store a new one
    ///
    /// `compute_fn` runs without holding a lock. If another caller stored a
    /// slot for the same key in the meantime, that slot is returned instead.
    pub fn get_or_compute<F>(&self, key: Color, compute_fn: F) -> usize
    where
        F: FnOnce() -> usize,
    {
        if let Some(slot) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return slot;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = compute_fn();
        self.insert(key, computed)
    }

    /// Store a slot unless one is already cached, returning the stored slot
    pub fn insert(&self, key: Color, slot: usize) -> usize {
        let Some(shard) = self.shard(key) else {
            return slot;
        };
        let mut map = shard.write().unwrap_or_else(PoisonError::into_inner);
        match map.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(slot),
        }
    }

    /// Number of cached query colors
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit and miss counts
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
