//! Editor tools - pointer painting, palette picking and scrolling
//!
//! Button edges are handled in `Update` so no click is missed. Scrolling and
//! the per-frame paint run in `FixedUpdate`, which keeps the camera speed at
//! one cell per tick whatever the render frame rate.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tile_canvas_core::{EditorState, PointerOutcome, ScreenPos, TileCatalog};

use crate::commands::scroll_input;

/// Plugin for editor tools and viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInputState>()
            .add_systems(
                Update,
                (track_cursor, handle_pointer_buttons, paint_on_pointer_move).chain(),
            )
            .add_systems(FixedUpdate, tick_editor);
    }
}

/// Pointer position in window pixels
#[derive(Resource, Default, Debug)]
pub struct PointerInputState {
    /// Current cursor position, `None` when outside the window
    pub cursor: Option<ScreenPos>,
    /// Cursor position the last pointer-move paint ran at
    pub last_painted_cursor: Option<ScreenPos>,
}

/// Convert a logical cursor position to whole pixels
pub fn to_screen_pos(cursor: Vec2) -> ScreenPos {
    ScreenPos::new(cursor.x.floor() as i32, cursor.y.floor() as i32)
}

fn track_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerInputState>,
) {
    pointer.cursor = windows
        .iter()
        .next()
        .and_then(|window| window.cursor_position())
        .map(to_screen_pos);
}

fn handle_pointer_buttons(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerInputState>,
    catalog: Res<TileCatalog>,
    mut editor_state: ResMut<EditorState>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        if let Some(pos) = pointer.cursor {
            match editor_state.pointer_down(pos, &catalog) {
                PointerOutcome::Selected(id) => debug!("Selected tile {}", id),
                PointerOutcome::OutOfRangePaletteIndex(_) | PointerOutcome::StartedDrawing => {}
            }
        }
    }

    if mouse_buttons.just_released(MouseButton::Left) {
        editor_state.pointer_up();
    }
}

fn paint_on_pointer_move(
    mut pointer: ResMut<PointerInputState>,
    mut editor_state: ResMut<EditorState>,
) {
    if pointer.cursor == pointer.last_painted_cursor || !editor_state.paint.is_drawing() {
        return;
    }
    pointer.last_painted_cursor = pointer.cursor;

    if let Some(pos) = pointer.cursor {
        editor_state.pointer_moved(pos);
    }
}

fn tick_editor(
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerInputState>,
    mut editor_state: ResMut<EditorState>,
) {
    let scroll = scroll_input(&keyboard);
    editor_state.tick(pointer.cursor, scroll);
}
