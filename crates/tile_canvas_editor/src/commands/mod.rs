//! Editor commands - keyboard shortcuts and level save

mod shortcuts;

pub use shortcuts::{handle_keyboard_shortcuts, palette_shortcut, scroll_input};

use bevy::prelude::*;
use tile_canvas_core::{EditorState, LevelFile, PersistenceError};

/// Save the grid to the level file, logging the result
pub fn save_level(level_file: &LevelFile, state: &EditorState) -> Result<(), PersistenceError> {
    match level_file.save(&state.grid) {
        Ok(()) => {
            info!(
                "Saved {} tiles to {}",
                state.grid.len(),
                level_file.path().display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to save {}: {}", level_file.path().display(), e);
            Err(e)
        }
    }
}
