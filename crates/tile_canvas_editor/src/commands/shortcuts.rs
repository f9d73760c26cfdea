//! Keyboard shortcut handling

use bevy::prelude::*;
use tile_canvas_core::{EditorState, LevelFile, ScrollInput, TileCatalog};

use super::save_level;

/// Digit keys selecting palette entries 0..=8
const PALETTE_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Snapshot of the held scroll keys (arrows or WASD)
pub fn scroll_input(keyboard: &ButtonInput<KeyCode>) -> ScrollInput {
    let held = |arrow, letter| keyboard.pressed(arrow) || keyboard.pressed(letter);
    ScrollInput {
        left: held(KeyCode::ArrowLeft, KeyCode::KeyA),
        right: held(KeyCode::ArrowRight, KeyCode::KeyD),
        up: held(KeyCode::ArrowUp, KeyCode::KeyW),
        down: held(KeyCode::ArrowDown, KeyCode::KeyS),
    }
}

/// Palette index for a digit key pressed this frame
pub fn palette_shortcut(keyboard: &ButtonInput<KeyCode>) -> Option<usize> {
    PALETTE_KEYS
        .iter()
        .position(|key| keyboard.just_pressed(*key))
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<TileCatalog>,
    level_file: Res<LevelFile>,
    mut editor_state: ResMut<EditorState>,
) {
    // E - Save
    if keyboard.just_pressed(KeyCode::KeyE) {
        save_level(&level_file, &editor_state).ok();
    }

    // 1-9 - Select palette entry
    if let Some(index) = palette_shortcut(&keyboard) {
        if let Some(id) = editor_state.paint.select_index(index, &catalog) {
            debug!("Selected tile {} ({})", id, index + 1);
        }
    }
}
