//! Color-keyed tile index with a stable iteration order

use crate::analysis::color::Color;
use crate::spatial::tiles::Tile;
use std::collections::HashMap;

/// Maps representative colors to tiles
///
/// Keys are unique. Inserting a tile whose color is already present replaces
/// the stored tile (last writer wins) but keeps the slot of the first tile
/// that produced the color, so iteration order only depends on the order
/// colors were first seen.
#[derive(Clone, Debug, Default)]
pub struct TileIndex {
    tiles: Vec<Tile>,
    slots: HashMap<Color, usize>,
}

impl TileIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tile under its representative color
    ///
    /// Returns the tile that was replaced, if the color was already present.
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        let color = tile.color();
        if let Some(existing) = self.slots.get(&color).and_then(|&slot| self.tiles.get_mut(slot))
        {
            return Some(std::mem::replace(existing, tile));
        }
        self.slots.insert(color, self.tiles.len());
        self.tiles.push(tile);
        None
    }

    /// Number of distinct representative colors
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the index holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Slot of the tile stored under exactly this color
    pub fn slot_of(&self, color: Color) -> Option<usize> {
        self.slots.get(&color).copied()
    }

    /// Tile stored under exactly this color
    pub fn get(&self, color: Color) -> Option<&Tile> {
        self.slot_of(color).and_then(|slot| self.tile(slot))
    }

    /// Tile at a slot
    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    /// Tiles in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Representative colors in iteration order
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        self.tiles.iter().map(Tile::color)
    }
}

impl FromIterator<Tile> for TileIndex {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut index = Self::new();
        for tile in iter {
            index.insert(tile);
        }
        index
    }
}
