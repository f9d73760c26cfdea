//! Editor state - the grid, camera and paint controller in one place

use crate::{
    Camera, Coord, PaintController, PointerOutcome, ScreenLayout, ScreenPos, ScrollInput,
    SparseGrid, TileCatalog, TileId, Viewport, VisibleCell,
};

/// All mutable editor state.
///
/// Each operation hands the components only the part they mutate: painting
/// gets the grid, scrolling gets the camera.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct EditorState {
    pub grid: SparseGrid,
    pub camera: Camera,
    pub paint: PaintController,
}

impl EditorState {
    pub fn new(layout: ScreenLayout, catalog: &TileCatalog, grid: SparseGrid) -> Self {
        Self {
            grid,
            camera: Camera::default(),
            paint: PaintController::new(layout, catalog),
        }
    }

    pub fn layout(&self) -> &ScreenLayout {
        self.paint.layout()
    }

    pub fn selected(&self) -> Option<TileId> {
        self.paint.selected()
    }

    pub fn pointer_down(&mut self, pos: ScreenPos, catalog: &TileCatalog) -> PointerOutcome {
        self.paint.on_pointer_down(pos, catalog)
    }

    pub fn pointer_up(&mut self) {
        self.paint.on_pointer_up();
    }

    pub fn pointer_moved(&mut self, pos: ScreenPos) -> Option<Coord> {
        self.paint.on_pointer_move(pos, &self.camera, &mut self.grid)
    }

    /// One frame: paint under the pointer with the camera as it stood at the
    /// start of the frame, then scroll.
    pub fn tick(&mut self, pointer: Option<ScreenPos>, scroll: ScrollInput) -> Option<Coord> {
        let painted = self.paint.on_frame_tick(pointer, &self.camera, &mut self.grid);
        PaintController::on_scroll_input(&mut self.camera, scroll);
        painted
    }

    /// Visible window for the current camera
    pub fn viewport(&self) -> Viewport {
        Viewport::new(*self.paint.layout(), self.camera)
    }

    /// Visible cells paired with the tile painted there
    pub fn visible_tiles(&self) -> impl Iterator<Item = (VisibleCell, Option<TileId>)> + '_ {
        self.viewport()
            .visible_cells()
            .map(move |cell| (cell, self.grid.get(cell.world)))
    }
}
