//! Canvas and palette rendering
//!
//! The canvas is a fixed pool of sprites, one per visible cell. Each frame the
//! pool is re-pointed at whatever the viewport shows, so the number of render
//! entities never depends on how much of the world has been painted.
//!
//! World units are window pixels with the origin at the window's top-left
//! corner and y pointing down the screen (so sprite y is negated).

use bevy::prelude::*;
use tile_canvas_core::{EditorState, ScreenLayout, TileCatalog, TileId};

use crate::EditorConfig;

const GRID_COLOR: Color = Color::srgb(0.118, 0.118, 0.118);
const PALETTE_SELECTED_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const PALETTE_IDLE_COLOR: Color = Color::srgb(0.392, 0.392, 0.392);

const CANVAS_Z: f32 = 0.0;
const BOTTOM_BAR_Z: f32 = 1.0;
const PALETTE_Z: f32 = 2.0;

/// Plugin for canvas rendering
pub struct CanvasRenderPlugin;

impl Plugin for CanvasRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CanvasSprites>()
            .add_systems(
                Startup,
                (
                    load_tile_textures,
                    spawn_canvas_cells,
                    spawn_bottom_bar,
                    spawn_palette,
                    spawn_instructions,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (sync_canvas_cells, draw_grid_lines, draw_palette_frames),
            );
    }
}

/// Tile images, indexed by `TileId`
#[derive(Resource, Default)]
pub struct TileTextures {
    pub handles: Vec<Handle<Image>>,
}

impl TileTextures {
    pub fn get(&self, id: TileId) -> Option<&Handle<Image>> {
        self.handles.get(id.index())
    }
}

/// Canvas sprite entities, in `Viewport::visible_cells` order
#[derive(Resource, Default)]
pub struct CanvasSprites {
    pub entities: Vec<Entity>,
}

/// Marker component for canvas cell sprites
#[derive(Component)]
pub struct CanvasCell;

/// Marker component for palette sprites
#[derive(Component)]
pub struct PaletteEntry {
    pub index: usize,
}

/// Center of a `size`-pixel square whose top-left corner is at pixel (x, y)
pub fn pixel_rect_center(x: f32, y: f32, size: f32) -> Vec2 {
    Vec2::new(x + size / 2.0, -(y + size / 2.0))
}

/// Center and size of a cell outline cut off at the canvas bottom edge.
///
/// `None` when the cell starts below the canvas.
pub fn canvas_clipped_rect(layout: &ScreenLayout, px: u32, py: u32) -> Option<(Vec2, Vec2)> {
    let visible_height = layout.canvas_height().checked_sub(py).filter(|h| *h > 0)?;
    let tile = layout.tile_size() as f32;
    let height = visible_height.min(layout.tile_size()) as f32;
    let center = Vec2::new(px as f32 + tile / 2.0, -(py as f32 + height / 2.0));
    Some((center, Vec2::new(tile, height)))
}

/// Center of the palette cell at `index`
pub fn palette_cell_center(layout: &ScreenLayout, index: usize) -> Vec2 {
    let tile = layout.tile_size() as f32;
    pixel_rect_center(index as f32 * tile, layout.palette_top() as f32, tile)
}

/// Load every catalog image through the asset server.
///
/// Paths are catalog file names, relative to the asset root.
fn load_tile_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<TileCatalog>,
) {
    let handles = catalog
        .iter()
        .map(|entry| asset_server.load(entry.file_name.clone()))
        .collect();
    commands.insert_resource(TileTextures { handles });
}

fn spawn_canvas_cells(
    mut commands: Commands,
    mut sprites: ResMut<CanvasSprites>,
    editor_state: Res<EditorState>,
) {
    let viewport = editor_state.viewport();
    let tile = editor_state.layout().tile_size() as f32;

    sprites.entities = viewport
        .visible_cells()
        .map(|cell| {
            let (px, py) = viewport.cell_origin_px(&cell);
            let center = pixel_rect_center(px as f32, py as f32, tile);
            commands
                .spawn((
                    CanvasCell,
                    Sprite {
                        custom_size: Some(Vec2::splat(tile)),
                        ..default()
                    },
                    Transform::from_translation(center.extend(CANVAS_Z)),
                    Visibility::Hidden,
                ))
                .id()
        })
        .collect();
}

/// Opaque strip under the palette and instructions, hiding the overscan row
fn spawn_bottom_bar(mut commands: Commands, editor_state: Res<EditorState>) {
    let layout = editor_state.layout();
    let width = layout.canvas_width() as f32;
    let height = (layout.window_height() - layout.palette_top()) as f32;
    let center = Vec2::new(width / 2.0, -(layout.palette_top() as f32 + height / 2.0));

    commands.spawn((
        Sprite::from_color(Color::BLACK, Vec2::new(width, height)),
        Transform::from_translation(center.extend(BOTTOM_BAR_Z)),
    ));
}

fn spawn_palette(
    mut commands: Commands,
    textures: Res<TileTextures>,
    catalog: Res<TileCatalog>,
    editor_state: Res<EditorState>,
) {
    let layout = editor_state.layout();
    let tile = layout.tile_size() as f32;

    for (index, entry) in catalog.iter().enumerate() {
        let Some(image) = textures.get(entry.id) else {
            continue;
        };
        let center = palette_cell_center(layout, index);
        commands.spawn((
            PaletteEntry { index },
            Sprite {
                image: image.clone(),
                custom_size: Some(Vec2::splat(tile)),
                ..default()
            },
            Transform::from_translation(center.extend(PALETTE_Z)),
        ));
    }
}

fn spawn_instructions(
    mut commands: Commands,
    config: Res<EditorConfig>,
    editor_state: Res<EditorState>,
) {
    let layout = editor_state.layout();
    let text = format!(
        "[Arrows/WASD] Move  |  [Mouse] Paint  |  [Click Palette] Change Tile  |  [E] Save to {}",
        config.level_file_name()
    );

    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(5.0),
            top: Val::Px(layout.instruction_top() as f32 + 2.0),
            ..default()
        },
    ));
}

/// Point every canvas sprite at the tile now under it
fn sync_canvas_cells(
    editor_state: Res<EditorState>,
    sprites: Res<CanvasSprites>,
    textures: Option<Res<TileTextures>>,
    mut cells: Query<(&mut Sprite, &mut Visibility), With<CanvasCell>>,
) {
    let Some(textures) = textures else {
        return;
    };

    for ((_, tile), entity) in editor_state.visible_tiles().zip(&sprites.entities) {
        let Ok((mut sprite, mut visibility)) = cells.get_mut(*entity) else {
            continue;
        };

        match tile.and_then(|id| textures.get(id)) {
            Some(image) => {
                if sprite.image != *image {
                    sprite.image = image.clone();
                }
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

fn draw_grid_lines(mut gizmos: Gizmos, editor_state: Res<EditorState>) {
    let layout = editor_state.layout();
    let viewport = editor_state.viewport();

    for cell in viewport.visible_cells() {
        let (px, py) = viewport.cell_origin_px(&cell);
        if let Some((center, size)) = canvas_clipped_rect(layout, px, py) {
            gizmos.rect_2d(Isometry2d::from_translation(center), size, GRID_COLOR);
        }
    }
}

fn draw_palette_frames(
    mut gizmos: Gizmos,
    catalog: Res<TileCatalog>,
    editor_state: Res<EditorState>,
) {
    let layout = editor_state.layout();
    let tile = layout.tile_size() as f32;
    let selected = editor_state.selected();

    for (index, entry) in catalog.iter().enumerate() {
        let color = if selected == Some(entry.id) {
            PALETTE_SELECTED_COLOR
        } else {
            PALETTE_IDLE_COLOR
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(palette_cell_center(layout, index)),
            Vec2::splat(tile),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_center() {
        assert_eq!(pixel_rect_center(0.0, 0.0, 16.0), Vec2::new(8.0, -8.0));
        assert_eq!(pixel_rect_center(32.0, 48.0, 16.0), Vec2::new(40.0, -56.0));
    }

    #[test]
    fn test_grid_outline_stops_at_canvas_edge() {
        let layout = ScreenLayout::new(16, 800, 600);
        assert_eq!(
            canvas_clipped_rect(&layout, 0, 0),
            Some((Vec2::new(8.0, -8.0), Vec2::splat(16.0)))
        );
        // Row 37 spans 592..608 and is cut to its top 8 pixels
        assert_eq!(
            canvas_clipped_rect(&layout, 32, 592),
            Some((Vec2::new(40.0, -596.0), Vec2::new(16.0, 8.0)))
        );
        assert_eq!(canvas_clipped_rect(&layout, 0, 600), None);
        assert_eq!(canvas_clipped_rect(&layout, 0, 608), None);
    }

    #[test]
    fn test_palette_cell_center() {
        let layout = ScreenLayout::new(16, 800, 600);
        assert_eq!(palette_cell_center(&layout, 0), Vec2::new(8.0, -608.0));
        assert_eq!(palette_cell_center(&layout, 2), Vec2::new(40.0, -608.0));
    }

    #[test]
    fn test_tile_textures_lookup() {
        let textures = TileTextures {
            handles: vec![Handle::default(), Handle::default()],
        };
        assert!(textures.get(TileId(1)).is_some());
        assert!(textures.get(TileId(2)).is_none());
    }
}
