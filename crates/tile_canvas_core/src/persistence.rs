//! Level file load/save
//!
//! A level file is a JSON object mapping `"x,y"` keys to tile ids:
//!
//! ```json
//! {
//!   "0,0": 2,
//!   "-3,5": 0
//! }
//! ```
//!
//! Loading never fails hard: a missing or empty file is the normal "no save
//! yet" case, and an unreadable or malformed file degrades to an empty grid
//! with the error attached so the caller can warn about it. Inside a valid
//! object, an entry with a bad key or a bad tile id is skipped on its own.

use crate::{GridError, SparseGrid, TileId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default level file name, relative to the working directory
pub const DEFAULT_LEVEL_FILE: &str = "level.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid level file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize level: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Result of loading a level file
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file, or a zero-length file
    Missing,
    /// File parsed; `skipped` lists entries with a malformed key or tile id
    Loaded {
        grid: SparseGrid,
        skipped: Vec<GridError>,
    },
    /// File exists but could not be read or parsed
    Malformed(PersistenceError),
}

impl LoadOutcome {
    /// The loaded grid, or an empty one for `Missing` and `Malformed`
    pub fn into_grid(self) -> SparseGrid {
        match self {
            LoadOutcome::Loaded { grid, .. } => grid,
            LoadOutcome::Missing | LoadOutcome::Malformed(_) => SparseGrid::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Load a grid from `path`
pub fn load(path: &Path) -> LoadOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LoadOutcome::Missing,
        Err(source) => {
            return LoadOutcome::Malformed(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.is_empty() {
        return LoadOutcome::Missing;
    }

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(source) => {
            return LoadOutcome::Malformed(PersistenceError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut skipped = Vec::new();
    let mut entries = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        match TileId::deserialize(&value) {
            Ok(tile) => entries.push((key, tile)),
            Err(_) => skipped.push(GridError::InvalidTile {
                key,
                value: value.to_string(),
            }),
        }
    }

    let (grid, bad_keys) = SparseGrid::deserialize_lenient(entries);
    skipped.extend(bad_keys);
    for err in &skipped {
        tracing::warn!("Skipping entry in {}: {}", path.display(), err);
    }
    tracing::debug!("Loaded {} cells from {}", grid.len(), path.display());

    LoadOutcome::Loaded { grid, skipped }
}

/// Write `grid` to `path`, replacing any previous content.
///
/// The data is written to a temporary sibling file first and then renamed
/// over `path`, so a reader sees either the old file or the new one.
pub fn save(path: &Path, grid: &SparseGrid) -> Result<()> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(grid)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let temp_path = temp_path_for(path);
    if let Err(source) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err(source));
    }
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err(source));
    }

    tracing::debug!("Saved {} cells to {}", grid.len(), path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_LEVEL_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// A level file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LevelFile {
    path: PathBuf,
}

impl LevelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        load(&self.path)
    }

    pub fn save(&self, grid: &SparseGrid) -> Result<()> {
        save(&self.path, grid)
    }
}

impl Default for LevelFile {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_FILE)
    }
}
