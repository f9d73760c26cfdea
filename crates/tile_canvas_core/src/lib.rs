//! Core data structures for tile_canvas
//!
//! This crate provides the model behind the infinite tile editor:
//! - `SparseGrid` - unbounded grid storing only painted cells
//! - `TileCatalog` - ordered set of paintable tiles
//! - `Viewport` - the finite window of cells visible from a camera
//! - `PaintController` - pointer/scroll input applied to the grid
//! - `persistence` - JSON level file load/save
//! - `EditorState` - all mutable editor state bundled together
//!
//! Nothing here talks to a window or input device; the editor crate feeds
//! input in and draws what `Viewport` reports.

mod catalog;
mod coord;
mod grid;
mod paint;
pub mod persistence;
mod state;
mod viewport;

pub use catalog::{CatalogError, TileCatalog, TileEntry, TileId};
pub use coord::{Coord, ScreenPos, KEY_SEPARATOR};
pub use grid::{GridError, SparseGrid};
pub use paint::{PaintController, PointerOutcome, ScreenRegion, ScrollInput};
pub use persistence::{LevelFile, LoadOutcome, PersistenceError};
pub use state::EditorState;
pub use viewport::{Camera, ScreenLayout, Viewport, VisibleCell, MAX_TILE_SIZE, PALETTE_PADDING};
