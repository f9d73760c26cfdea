//! tile_canvas_editor - infinite-canvas tile painter for Bevy
//!
//! This crate wires the `tile_canvas_core` model into a Bevy app:
//! - Configuration file (window size, tile size, file locations)
//! - Tile catalog from a directory of images
//! - Pointer painting, palette picking and keyboard scrolling
//! - Sprite rendering of the visible window and palette
//! - Level save on `E`
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tile_canvas_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new().with_level_path("level.json"))
//!         .run();
//! }
//! ```
//!
//! Tile images are loaded through the asset server by file name, so the
//! app's asset root should be the configured tile directory.

pub mod commands;
pub mod config;
pub mod render;
pub mod tools;

// Re-export the core model
pub use tile_canvas_core;

use bevy::prelude::*;
use std::path::PathBuf;
use tile_canvas_core::{Coord, EditorState, LevelFile, LoadOutcome, SparseGrid, TileCatalog};

use commands::handle_keyboard_shortcuts;
pub use config::{ConfigError, EditorConfig};
use render::CanvasRenderPlugin;
use tools::EditorToolsPlugin;

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use tile_canvas_editor::EditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_tile_dir("tiles")
///             .with_tile_size(32)
///     )
///     .run();
/// ```
pub struct EditorPlugin {
    /// Editor configuration
    pub config: EditorConfig,
    /// Problem hit while reading the config file, reported once logging is up
    pub config_warning: Option<String>,
}

impl Default for EditorPlugin {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            config_warning: None,
        }
    }
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor plugin from the user's config file.
    ///
    /// A missing file is created with the defaults; an unreadable one falls
    /// back to the defaults and is reported as a warning at startup, as are
    /// out-of-range values.
    pub fn from_config_file() -> Self {
        match EditorConfig::load_from_file() {
            Ok(Some(mut config)) => {
                let problems = config.validate();
                let config_warning = (!problems.is_empty()).then(|| {
                    format!(
                        "Invalid config values replaced with defaults: {}",
                        problems.join("; ")
                    )
                });
                Self {
                    config,
                    config_warning,
                }
            }
            Ok(None) => {
                let config = EditorConfig::default();
                let config_warning = config
                    .save()
                    .err()
                    .map(|e| format!("Could not write default config: {}", e));
                Self {
                    config,
                    config_warning,
                }
            }
            Err(e) => Self {
                config: EditorConfig::default(),
                config_warning: Some(format!("Could not load config: {}. Using defaults.", e)),
            },
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the level file path
    pub fn with_level_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.level_path = path.into();
        self
    }

    /// Set the tile image directory
    pub fn with_tile_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tile_dir = path.into();
        self
    }

    /// Set the tile size in pixels
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.config.tile_size = tile_size;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        if let Some(warning) = &self.config_warning {
            warn!("{}", warning);
        }

        let mut config = self.config.clone();
        for problem in config.validate() {
            warn!("{}. Using the default.", problem);
        }

        let catalog = load_catalog(&config);
        let level_file = LevelFile::new(&config.level_path);
        let grid = load_level(&level_file);
        let editor_state = EditorState::new(config.layout(), &catalog, grid);

        let unknown = count_unknown_tiles(&editor_state.grid, &catalog);
        if unknown > 0 {
            warn!("{} painted cells use tile ids with no image", unknown);
        }
        if let Some((min, max)) = offscreen_extent(&editor_state) {
            info!("Painted cells span {} to {}, none in view", min, max);
        }

        app.add_plugins(CanvasRenderPlugin)
            .add_plugins(EditorToolsPlugin)
            .insert_resource(ClearColor(Color::BLACK))
            .insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
            .insert_resource(editor_state)
            .insert_resource(catalog)
            .insert_resource(level_file)
            .insert_resource(config)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, handle_keyboard_shortcuts);
    }
}

/// Enumerate the tile directory, falling back to an empty palette
pub fn load_catalog(config: &EditorConfig) -> TileCatalog {
    let dir = config.tile_dir_absolute();
    match TileCatalog::scan_dir(&dir, &config.tile_extension) {
        Ok(catalog) => {
            info!("Found {} tiles in {}", catalog.len(), dir.display());
            catalog
        }
        Err(e) => {
            warn!("{}. Starting with an empty palette.", e);
            TileCatalog::default()
        }
    }
}

/// Load the level file; any failure leaves an empty grid
pub fn load_level(level_file: &LevelFile) -> SparseGrid {
    let path = level_file.path().display();
    let outcome = level_file.load();
    match &outcome {
        LoadOutcome::Loaded { grid, skipped } => {
            info!("Loaded existing {} ({} tiles)", path, grid.len());
            if !skipped.is_empty() {
                warn!("{} entries in {} were skipped", skipped.len(), path);
            }
        }
        LoadOutcome::Missing => {
            info!("No valid {} found, starting with empty grid.", path);
        }
        LoadOutcome::Malformed(e) => {
            warn!("{} is invalid, starting with empty grid: {}", path, e);
        }
    }
    outcome.into_grid()
}

/// Painted cells whose tile id has no catalog entry
pub fn count_unknown_tiles(grid: &SparseGrid, catalog: &TileCatalog) -> usize {
    grid.iter().filter(|(_, tile)| !catalog.contains(*tile)).count()
}

/// Extent of the painted cells when none of them is on screen
pub fn offscreen_extent(state: &EditorState) -> Option<(Coord, Coord)> {
    let extent = state.grid.bounds()?;
    let viewport = state.viewport();
    let in_view = state.grid.iter().any(|(coord, _)| viewport.contains(coord));
    (!in_view).then_some(extent)
}

/// Spawns the editor camera so that world units match window pixels, with
/// the origin at the window's top-left corner
fn setup_editor_camera(mut commands: Commands, editor_state: Res<EditorState>) {
    let layout = editor_state.layout();
    let width = layout.canvas_width() as f32;
    let height = layout.window_height() as f32;
    commands.spawn((
        Camera2d,
        Transform::from_xyz(width / 2.0, -height / 2.0, 0.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tile_canvas_core::{ScreenLayout, TileId};

    #[test]
    fn test_load_level_fallbacks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("level.json");
        let file = LevelFile::new(&path);

        assert!(load_level(&file).is_empty());

        std::fs::write(&path, "not json").unwrap();
        assert!(load_level(&file).is_empty());

        std::fs::write(&path, r#"{"4,-2": 3, "abc": 1}"#).unwrap();
        let grid = load_level(&file);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(Coord::new(4, -2)), Some(TileId(3)));
    }

    #[test]
    fn test_load_catalog() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.png", "a.png", "readme.md"] {
            std::fs::write(temp_dir.path().join(name), b"").unwrap();
        }

        let config = EditorConfig {
            tile_dir: temp_dir.path().to_path_buf(),
            ..EditorConfig::default()
        };
        let catalog = load_catalog(&config);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).map(|e| e.file_name.as_str()), Some("a.png"));

        let missing = EditorConfig {
            tile_dir: temp_dir.path().join("missing"),
            ..EditorConfig::default()
        };
        assert!(load_catalog(&missing).is_empty());
    }

    #[test]
    fn test_plugin_builder() {
        let plugin = EditorPlugin::new()
            .with_level_path("maps/one.json")
            .with_tile_dir("tiles")
            .with_tile_size(32);
        assert_eq!(plugin.config().level_path, PathBuf::from("maps/one.json"));
        assert_eq!(plugin.config().tile_size, 32);
        assert!(plugin.config_warning.is_none());
    }

    #[test]
    fn test_count_unknown_tiles() {
        let catalog = TileCatalog::from_file_names(["a.png", "b.png"]);
        let grid: SparseGrid = [
            (Coord::new(0, 0), TileId(1)),
            (Coord::new(1, 0), TileId(2)),
            (Coord::new(2, 0), TileId(9)),
        ]
        .into_iter()
        .collect();
        assert_eq!(count_unknown_tiles(&grid, &catalog), 2);
        assert_eq!(count_unknown_tiles(&SparseGrid::new(), &catalog), 0);
    }

    #[test]
    fn test_offscreen_extent() {
        let catalog = TileCatalog::from_file_names(["a.png"]);
        let layout = ScreenLayout::new(16, 160, 160);

        let empty = EditorState::new(layout, &catalog, SparseGrid::new());
        assert_eq!(offscreen_extent(&empty), None);

        let far: SparseGrid = [(Coord::new(-50, 3), TileId(0)), (Coord::new(200, 40), TileId(0))]
            .into_iter()
            .collect();
        let state = EditorState::new(layout, &catalog, far);
        assert_eq!(
            offscreen_extent(&state),
            Some((Coord::new(-50, 3), Coord::new(200, 40)))
        );

        let mut near = state.grid.clone();
        near.set(Coord::new(4, 4), TileId(0));
        let state = EditorState::new(layout, &catalog, near);
        assert_eq!(offscreen_extent(&state), None);
    }
}
