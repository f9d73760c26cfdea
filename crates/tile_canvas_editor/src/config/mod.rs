//! Editor configuration
//!
//! Window geometry, file locations and tick rate. Stored as JSON in the
//! platform config directory (see `file.rs`); every field has a default so a
//! partial file is fine.

mod file;

pub use file::ConfigError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tile_canvas_core::persistence::DEFAULT_LEVEL_FILE;
use tile_canvas_core::{ScreenLayout, MAX_TILE_SIZE};

/// Largest canvas edge or strip height in pixels
pub const MAX_CANVAS_SIZE: u32 = 8192;
/// Highest accepted tick rate
pub const MAX_TICK_RATE_HZ: f64 = 1000.0;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels (palette and instructions go below)
    pub canvas_height: u32,
    /// Height of the instruction strip in pixels
    pub instruction_height: u32,
    /// Input/paint ticks per second
    pub tick_rate_hz: f64,
    /// Level file, relative to the working directory unless absolute
    pub level_path: PathBuf,
    /// Directory holding the tile images
    pub tile_dir: PathBuf,
    /// Tile image extension, without the dot
    pub tile_extension: String,
    pub window_title: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            canvas_width: 800,
            canvas_height: 600,
            instruction_height: 20,
            tick_rate_hz: 60.0,
            level_path: PathBuf::from(DEFAULT_LEVEL_FILE),
            tile_dir: PathBuf::from("assets"),
            tile_extension: "png".to_string(),
            window_title: "Infinite Level Editor".to_string(),
        }
    }
}

impl EditorConfig {
    /// Reset out-of-range values to their defaults.
    ///
    /// Returns one message per field that was replaced.
    pub fn validate(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut problems = Vec::new();

        if !(1..=MAX_TILE_SIZE).contains(&self.tile_size) {
            problems.push(format!(
                "tile_size {} is outside 1..={}",
                self.tile_size, MAX_TILE_SIZE
            ));
            self.tile_size = defaults.tile_size;
        }
        if !(1..=MAX_CANVAS_SIZE).contains(&self.canvas_width) {
            problems.push(format!(
                "canvas_width {} is outside 1..={}",
                self.canvas_width, MAX_CANVAS_SIZE
            ));
            self.canvas_width = defaults.canvas_width;
        }
        if !(1..=MAX_CANVAS_SIZE).contains(&self.canvas_height) {
            problems.push(format!(
                "canvas_height {} is outside 1..={}",
                self.canvas_height, MAX_CANVAS_SIZE
            ));
            self.canvas_height = defaults.canvas_height;
        }
        if self.instruction_height > MAX_CANVAS_SIZE {
            problems.push(format!(
                "instruction_height {} is above {}",
                self.instruction_height, MAX_CANVAS_SIZE
            ));
            self.instruction_height = defaults.instruction_height;
        }
        // False for NaN too
        let rate_in_range = self.tick_rate_hz > 0.0 && self.tick_rate_hz <= MAX_TICK_RATE_HZ;
        if !rate_in_range {
            problems.push(format!(
                "tick_rate_hz {} is outside (0, {}]",
                self.tick_rate_hz, MAX_TICK_RATE_HZ
            ));
            self.tick_rate_hz = defaults.tick_rate_hz;
        }

        problems
    }

    /// Screen geometry for the core model
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.tile_size, self.canvas_width, self.canvas_height)
            .with_instruction_height(self.instruction_height)
    }

    /// Tile directory resolved against the working directory
    pub fn tile_dir_absolute(&self) -> PathBuf {
        absolute(&self.tile_dir)
    }

    /// Level file name as shown to the user
    pub fn level_file_name(&self) -> String {
        self.level_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_LEVEL_FILE.to_string())
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
