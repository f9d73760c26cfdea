//! Tile catalog - the ordered set of paintable tiles
//!
//! The catalog is built once at startup from a sorted listing of tile asset
//! file names. A tile's position in that listing is its `TileId`, and the same
//! order is used left-to-right in the palette.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Index of a tile in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read tile directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One tile asset in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEntry {
    pub id: TileId,
    /// Asset file name, relative to the tile directory
    pub file_name: String,
}

/// Ordered, immutable list of available tiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct TileCatalog {
    entries: Vec<TileEntry>,
}

impl TileCatalog {
    /// Build a catalog from asset file names.
    ///
    /// Names are sorted lexicographically before ids are assigned, so the
    /// result does not depend on the order the names were listed in.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();

        let entries = names
            .into_iter()
            .enumerate()
            .map(|(index, file_name)| TileEntry {
                id: TileId(index as u32),
                file_name,
            })
            .collect();

        Self { entries }
    }

    /// Enumerate `dir` for files ending in `.{extension}` and build a catalog
    pub fn scan_dir(dir: &Path, extension: &str) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let matches = Path::new(&file_name)
                .extension()
                .is_some_and(|ext| ext == extension);
            if matches {
                names.push(file_name);
            }
        }

        Ok(Self::from_file_names(names))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a palette index, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&TileEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, id: TileId) -> bool {
        id.index() < self.entries.len()
    }

    /// First tile, the default selection
    pub fn first(&self) -> Option<TileId> {
        self.entries.first().map(|e| e.id)
    }

    /// Entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &TileEntry> {
        self.entries.iter()
    }
}
