//! Paint controller - pointer and scroll input applied to the grid
//!
//! Pointer positions arrive in window pixels. A press inside the palette strip
//! selects a tile; a press anywhere else arms drawing until the button is
//! released. While armed, every pointer move or frame tick over the canvas
//! paints the selected tile into the cell under the pointer.

use crate::{Camera, Coord, ScreenLayout, ScreenPos, SparseGrid, TileCatalog, TileId};

/// Which part of the window a pointer position falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRegion {
    Canvas,
    Palette,
    Instructions,
}

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Palette cell picked, new selection
    Selected(TileId),
    /// Palette click past the last catalog entry
    OutOfRangePaletteIndex(usize),
    /// Drawing armed
    StartedDrawing,
}

/// Snapshot of the scroll directions held during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ScrollInput {
    pub const NONE: ScrollInput = ScrollInput {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    pub fn is_idle(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }
}

/// Owns the drawing flag and the selected tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintController {
    layout: ScreenLayout,
    selected: Option<TileId>,
    drawing: bool,
}

impl PaintController {
    /// New controller with the first catalog tile selected
    pub fn new(layout: ScreenLayout, catalog: &TileCatalog) -> Self {
        Self {
            layout,
            selected: catalog.first(),
            drawing: false,
        }
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn region_at(&self, pos: ScreenPos) -> ScreenRegion {
        let y = i64::from(pos.y);
        if y < i64::from(self.layout.palette_top()) {
            ScreenRegion::Canvas
        } else if y < i64::from(self.layout.instruction_top()) {
            ScreenRegion::Palette
        } else {
            ScreenRegion::Instructions
        }
    }

    /// World cell under a pointer position
    pub fn screen_to_world(&self, pos: ScreenPos, camera: &Camera) -> Coord {
        let tile = self.layout.tile_size() as i32;
        camera
            .origin
            .offset(pos.x.div_euclid(tile), pos.y.div_euclid(tile))
    }

    /// Select the catalog entry at a palette index.
    ///
    /// Returns `None` and leaves the selection alone when the index is past
    /// the end of the catalog.
    pub fn select_index(&mut self, index: usize, catalog: &TileCatalog) -> Option<TileId> {
        let id = catalog.get(index)?.id;
        self.selected = Some(id);
        Some(id)
    }

    pub fn on_pointer_down(&mut self, pos: ScreenPos, catalog: &TileCatalog) -> PointerOutcome {
        if self.region_at(pos) != ScreenRegion::Palette {
            self.drawing = true;
            return PointerOutcome::StartedDrawing;
        }

        // Negative x lies left of the window; no palette cell lives there
        let index = match usize::try_from(pos.x.div_euclid(self.layout.tile_size() as i32)) {
            Ok(index) => index,
            Err(_) => return PointerOutcome::OutOfRangePaletteIndex(usize::MAX),
        };
        match self.select_index(index, catalog) {
            Some(id) => PointerOutcome::Selected(id),
            None => PointerOutcome::OutOfRangePaletteIndex(index),
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Paint under the pointer if drawing is armed and the pointer is over
    /// the canvas. Returns the painted cell.
    pub fn on_pointer_move(
        &self,
        pos: ScreenPos,
        camera: &Camera,
        grid: &mut SparseGrid,
    ) -> Option<Coord> {
        if !self.drawing || self.region_at(pos) != ScreenRegion::Canvas {
            return None;
        }
        let tile = self.selected?;
        let world = self.screen_to_world(pos, camera);
        grid.set(world, tile);
        Some(world)
    }

    /// Per-frame paint; `pointer` is `None` when the cursor is outside the window
    pub fn on_frame_tick(
        &self,
        pointer: Option<ScreenPos>,
        camera: &Camera,
        grid: &mut SparseGrid,
    ) -> Option<Coord> {
        pointer.and_then(|pos| self.on_pointer_move(pos, camera, grid))
    }

    /// Move the camera one cell for each held direction.
    ///
    /// Directions are applied independently, so holding both keys on one
    /// axis cancels out.
    pub fn on_scroll_input(camera: &mut Camera, held: ScrollInput) {
        let mut dx = 0;
        let mut dy = 0;
        if held.left {
            dx -= 1;
        }
        if held.right {
            dx += 1;
        }
        if held.up {
            dy -= 1;
        }
        if held.down {
            dy += 1;
        }
        camera.origin = camera.origin.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: usize) -> TileCatalog {
        TileCatalog::from_file_names((0..n).map(|i| format!("tile_{i:02}.png")))
    }

    fn controller(n: usize) -> (PaintController, TileCatalog) {
        let catalog = catalog(n);
        (
            PaintController::new(ScreenLayout::new(16, 800, 600), &catalog),
            catalog,
        )
    }

    #[test]
    fn test_defaults() {
        let (paint, _) = controller(4);
        assert_eq!(paint.selected(), Some(TileId(0)));
        assert!(!paint.is_drawing());

        let (empty, _) = controller(0);
        assert_eq!(empty.selected(), None);
    }

    #[test]
    fn test_regions() {
        let (paint, _) = controller(1);
        assert_eq!(paint.region_at(ScreenPos::new(5, 0)), ScreenRegion::Canvas);
        assert_eq!(paint.region_at(ScreenPos::new(5, 599)), ScreenRegion::Canvas);
        assert_eq!(paint.region_at(ScreenPos::new(5, 600)), ScreenRegion::Palette);
        assert_eq!(paint.region_at(ScreenPos::new(5, 619)), ScreenRegion::Palette);
        assert_eq!(paint.region_at(ScreenPos::new(5, 620)), ScreenRegion::Instructions);
    }

    #[test]
    fn test_palette_selection() {
        let (mut paint, catalog) = controller(4);

        let outcome = paint.on_pointer_down(ScreenPos::new(33, 605), &catalog);
        assert_eq!(outcome, PointerOutcome::Selected(TileId(2)));
        assert_eq!(paint.selected(), Some(TileId(2)));

        let outcome = paint.on_pointer_down(ScreenPos::new(70, 605), &catalog);
        assert_eq!(outcome, PointerOutcome::OutOfRangePaletteIndex(4));
        assert_eq!(paint.selected(), Some(TileId(2)));
        assert!(!paint.is_drawing());
    }

    #[test]
    fn test_palette_click_does_not_paint() {
        let (mut paint, catalog) = controller(4);
        let mut grid = SparseGrid::new();
        let camera = Camera::default();

        paint.on_pointer_down(ScreenPos::new(17, 610), &catalog);
        assert!(!paint.is_drawing());
        assert_eq!(paint.on_pointer_move(ScreenPos::new(40, 40), &camera, &mut grid), None);
        assert_eq!(paint.on_frame_tick(Some(ScreenPos::new(41, 41)), &camera, &mut grid), None);
        assert!(grid.is_empty());

        assert_eq!(
            paint.on_pointer_down(ScreenPos::new(40, 40), &catalog),
            PointerOutcome::StartedDrawing
        );
        let painted = paint.on_pointer_move(ScreenPos::new(40, 40), &camera, &mut grid);
        assert_eq!(painted, Some(Coord::new(2, 2)));
        assert_eq!(grid.get(Coord::new(2, 2)), Some(TileId(1)));
    }

    #[test]
    fn test_paint_uses_camera_offset() {
        let (mut paint, catalog) = controller(3);
        let mut grid = SparseGrid::new();
        let camera = Camera::at(Coord::new(-100, 7));

        paint.on_pointer_down(ScreenPos::new(0, 0), &catalog);
        paint.on_frame_tick(Some(ScreenPos::new(15, 31)), &camera, &mut grid);
        assert_eq!(grid.get(Coord::new(-100, 8)), Some(TileId(0)));
    }

    #[test]
    fn test_no_paint_outside_canvas_or_after_release() {
        let (mut paint, catalog) = controller(2);
        let mut grid = SparseGrid::new();
        let camera = Camera::default();

        // Pressing on the instruction strip still arms drawing
        assert_eq!(
            paint.on_pointer_down(ScreenPos::new(10, 630), &catalog),
            PointerOutcome::StartedDrawing
        );
        assert_eq!(paint.on_pointer_move(ScreenPos::new(10, 630), &camera, &mut grid), None);
        assert_eq!(paint.on_pointer_move(ScreenPos::new(10, 605), &camera, &mut grid), None);
        assert_eq!(paint.on_frame_tick(None, &camera, &mut grid), None);
        assert!(grid.is_empty());

        paint.on_pointer_up();
        assert!(!paint.is_drawing());
        assert_eq!(paint.on_pointer_move(ScreenPos::new(10, 10), &camera, &mut grid), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_empty_catalog_paints_nothing() {
        let (mut paint, catalog) = controller(0);
        let mut grid = SparseGrid::new();
        paint.on_pointer_down(ScreenPos::new(10, 10), &catalog);
        assert!(paint.is_drawing());
        assert_eq!(paint.on_pointer_move(ScreenPos::new(10, 10), &Camera::default(), &mut grid), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_scroll_accumulation() {
        let mut camera = Camera::default();
        let right_down = ScrollInput {
            right: true,
            down: true,
            ..ScrollInput::NONE
        };
        for _ in 0..5 {
            PaintController::on_scroll_input(&mut camera, right_down);
        }
        assert_eq!(camera.origin, Coord::new(5, 5));

        let up = ScrollInput {
            up: true,
            ..ScrollInput::NONE
        };
        for _ in 0..3 {
            PaintController::on_scroll_input(&mut camera, up);
        }
        assert_eq!(camera.origin, Coord::new(5, 2));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut camera = Camera::at(Coord::new(1, 1));
        let all = ScrollInput {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        PaintController::on_scroll_input(&mut camera, all);
        assert_eq!(camera.origin, Coord::new(1, 1));
        assert!(!all.is_idle());
        assert!(ScrollInput::NONE.is_idle());
    }

    #[test]
    fn test_select_index_shortcut() {
        let (mut paint, catalog) = controller(3);
        assert_eq!(paint.select_index(2, &catalog), Some(TileId(2)));
        assert_eq!(paint.select_index(3, &catalog), None);
        assert_eq!(paint.selected(), Some(TileId(2)));
    }

    #[test]
    fn test_huge_tile_size_maps_pointer() {
        let catalog = catalog(1);
        let paint = PaintController::new(ScreenLayout::new(1 << 31, 800, 600), &catalog);
        let camera = Camera::at(Coord::new(2, 2));
        assert_eq!(paint.screen_to_world(ScreenPos::new(40, 40), &camera), Coord::new(2, 2));
        assert_eq!(paint.screen_to_world(ScreenPos::new(5000, 40), &camera), Coord::new(3, 2));
    }
}
