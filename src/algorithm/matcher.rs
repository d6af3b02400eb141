//! Nearest-color tile lookup with memoization
//!
//! Candidates are compared by squared Euclidean distance in RGB space. Ties
//! go to the candidate that comes first in index iteration order.

use crate::algorithm::cache::{CacheStats, MatchCache};
use crate::analysis::color::Color;
use crate::analysis::index::TileIndex;
use crate::io::error::{MosaicError, Result};
use crate::spatial::tiles::Tile;

/// Resolves query colors to the closest tile of an index
///
/// The cache only accelerates repeated queries; every lookup returns the
/// same tile a full scan would.
pub struct ColorMatcher<'a> {
    index: &'a TileIndex,
    cache: MatchCache,
}

impl<'a> ColorMatcher<'a> {
    /// Create a matcher with an empty cache
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if the index holds no tiles
    pub fn new(index: &'a TileIndex) -> Result<Self> {
        if index.is_empty() {
            return Err(MosaicError::EmptyLibrary { attempted: 0 });
        }
        Ok(Self {
            index,
            cache: MatchCache::new(),
        })
    }

    /// Index this matcher searches
    pub const fn index(&self) -> &'a TileIndex {
        self.index
    }

    /// Closest tile to `query`
    ///
    /// Exact index keys short-circuit the distance search. Both exact and
    /// searched results are cached under the query color.
    ///
    /// # Errors
    ///
    /// Returns an error only if the index lost all its tiles, which a
    /// constructed matcher rules out
    pub fn nearest(&self, query: Color) -> Result<&'a Tile> {
        let slot = match self.index.slot_of(query) {
            Some(exact) => self.cache.insert(query, exact),
            None => self
                .cache
                .get_or_compute(query, || nearest_slot(self.index, query).unwrap_or(0)),
        };
        self.tile_at(slot)
    }

    /// Closest tile to `query` without consulting or filling the cache
    ///
    /// # Errors
    ///
    /// Returns an error only if the index holds no tiles
    pub fn nearest_uncached(&self, query: Color) -> Result<&'a Tile> {
        let slot = self
            .index
            .slot_of(query)
            .or_else(|| nearest_slot(self.index, query))
            .ok_or(MosaicError::EmptyLibrary { attempted: 0 })?;
        self.tile_at(slot)
    }

    fn tile_at(&self, slot: usize) -> Result<&'a Tile> {
        self.index
            .tile(slot)
            .ok_or(MosaicError::EmptyLibrary { attempted: 0 })
    }

    /// Cache hit and miss counts so far
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of distinct query colors resolved so far
    pub fn cached_colors(&self) -> usize {
        self.cache.len()
    }
}

/// Slot of the first index entry with minimal distance to `query`
pub fn nearest_slot(index: &TileIndex, query: Color) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, color) in index.colors().enumerate() {
        let distance = color.squared_distance(query);
        // Strict comparison keeps the earliest candidate on ties
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((slot, distance));
        }
    }
    best.map(|(slot, _)| slot)
}
