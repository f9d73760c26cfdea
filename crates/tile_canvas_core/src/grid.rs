//! Sparse infinite tile grid
//!
//! Only painted cells are stored, so memory use is proportional to the number
//! of painted cells and never to the extent of the world. A missing key means
//! the cell is empty.

use crate::{Coord, TileId};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("malformed grid key {key:?}: expected \"<x>,<y>\"")]
    MalformedKey { key: String },

    #[error("invalid tile id {value} at {key:?}: expected a non-negative integer")]
    InvalidTile { key: String, value: String },
}

/// Mapping from world coordinates to tile ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseGrid {
    cells: HashMap<Coord, TileId>,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile at `coord`, `None` for an empty cell
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<TileId> {
        self.cells.get(&coord).copied()
    }

    /// Paint `coord` with `tile`, overwriting whatever was there
    #[inline]
    pub fn set(&mut self, coord: Coord, tile: TileId) {
        self.cells.insert(coord, tile);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Painted cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, TileId)> + '_ {
        self.cells.iter().map(|(coord, tile)| (*coord, *tile))
    }

    /// Smallest and largest painted coordinate on each axis
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut cells = self.cells.keys();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), c| {
            (
                Coord::new(min.x.min(c.x), min.y.min(c.y)),
                Coord::new(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }

    /// Cells as `("x,y", id)` pairs, ordered by row then column
    pub fn serialize(&self) -> Vec<(String, TileId)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_unstable_by_key(|(c, _)| (c.y, c.x));
        cells
            .into_iter()
            .map(|(coord, tile)| (coord.to_string(), tile))
            .collect()
    }

    /// Rebuild a grid from serialized pairs, failing on the first malformed key
    pub fn deserialize<I, K>(entries: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (K, TileId)>,
        K: AsRef<str>,
    {
        let mut grid = Self::new();
        for (key, tile) in entries {
            grid.set(key.as_ref().parse()?, tile);
        }
        Ok(grid)
    }

    /// Rebuild a grid from serialized pairs, skipping malformed keys.
    ///
    /// The skipped keys are returned so the caller can report them.
    pub fn deserialize_lenient<I, K>(entries: I) -> (Self, Vec<GridError>)
    where
        I: IntoIterator<Item = (K, TileId)>,
        K: AsRef<str>,
    {
        let mut grid = Self::new();
        let mut skipped = Vec::new();
        for (key, tile) in entries {
            match key.as_ref().parse::<Coord>() {
                Ok(coord) => grid.set(coord, tile),
                Err(err) => skipped.push(err),
            }
        }
        (grid, skipped)
    }
}

impl FromIterator<(Coord, TileId)> for SparseGrid {
    fn from_iter<T: IntoIterator<Item = (Coord, TileId)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SparseGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = SparseGrid::serialize(self);
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, tile) in &entries {
            map.serialize_entry(key, tile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SparseGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GridVisitor;

        impl<'de> Visitor<'de> for GridVisitor {
            type Value = SparseGrid;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of \"x,y\" keys to tile ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SparseGrid, A::Error> {
                let mut grid = SparseGrid::new();
                while let Some((key, tile)) = access.next_entry::<String, TileId>()? {
                    let coord = key.parse::<Coord>().map_err(de::Error::custom)?;
                    grid.set(coord, tile);
                }
                Ok(grid)
            }
        }

        deserializer.deserialize_map(GridVisitor)
    }
}
