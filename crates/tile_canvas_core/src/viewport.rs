//! Screen layout, camera and the visible window of the infinite grid

use crate::Coord;

/// Extra height of the palette strip over one tile
pub const PALETTE_PADDING: u32 = 4;
/// Largest tile edge in pixels; keeps pixel math exact in `i32`
pub const MAX_TILE_SIZE: u32 = 4096;
/// Default height of the instruction strip in pixels
pub const DEFAULT_INSTRUCTION_HEIGHT: u32 = 20;

/// Fixed pixel geometry of the editor window.
///
/// The canvas occupies the top `canvas_width x canvas_height` pixels, the
/// palette strip sits directly below it and the instruction strip below that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    tile_size: u32,
    canvas_width: u32,
    canvas_height: u32,
    instruction_height: u32,
}

impl ScreenLayout {
    /// Create a layout. The tile size is clamped to `1..=MAX_TILE_SIZE`.
    pub fn new(tile_size: u32, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            tile_size: tile_size.clamp(1, MAX_TILE_SIZE),
            canvas_width,
            canvas_height,
            instruction_height: DEFAULT_INSTRUCTION_HEIGHT,
        }
    }

    pub fn with_instruction_height(mut self, height: u32) -> Self {
        self.instruction_height = height;
        self
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    pub fn palette_height(&self) -> u32 {
        self.tile_size.saturating_add(PALETTE_PADDING)
    }

    pub fn instruction_height(&self) -> u32 {
        self.instruction_height
    }

    /// Top edge of the palette strip
    pub fn palette_top(&self) -> u32 {
        self.canvas_height
    }

    /// Top edge of the instruction strip
    pub fn instruction_top(&self) -> u32 {
        self.canvas_height.saturating_add(self.palette_height())
    }

    /// Full window height including both bottom strips
    pub fn window_height(&self) -> u32 {
        self.instruction_top().saturating_add(self.instruction_height)
    }

    /// Visible columns, including one column of overscan
    pub fn cols(&self) -> u32 {
        self.canvas_width.div_ceil(self.tile_size).saturating_add(1)
    }

    /// Visible rows, including one row of overscan
    pub fn rows(&self) -> u32 {
        self.canvas_height.div_ceil(self.tile_size).saturating_add(1)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(16, 800, 600)
    }
}

/// World coordinate shown at the top-left cell of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    pub origin: Coord,
}

impl Camera {
    pub fn at(origin: Coord) -> Self {
        Self { origin }
    }
}

/// One visible cell: its column/row on screen and the world cell it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCell {
    pub screen_x: u32,
    pub screen_y: u32,
    pub world: Coord,
}

/// The finite window of world cells visible for a given camera.
///
/// Cheap to build; the editor recreates it every frame from the current
/// camera, so it never carries state between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    layout: ScreenLayout,
    origin: Coord,
}

impl Viewport {
    pub fn new(layout: ScreenLayout, camera: Camera) -> Self {
        Self {
            layout,
            origin: camera.origin,
        }
    }

    pub fn cols(&self) -> u32 {
        self.layout.cols()
    }

    pub fn rows(&self) -> u32 {
        self.layout.rows()
    }

    /// Total number of visible cells
    pub fn cell_count(&self) -> usize {
        self.cols() as usize * self.rows() as usize
    }

    /// Every visible cell in row-major order
    pub fn visible_cells(&self) -> impl Iterator<Item = VisibleCell> {
        let cols = self.cols();
        let rows = self.rows();
        let origin = self.origin;
        (0..rows).flat_map(move |screen_y| {
            (0..cols).map(move |screen_x| VisibleCell {
                screen_x,
                screen_y,
                world: origin.offset(screen_x as i32, screen_y as i32),
            })
        })
    }

    /// Whether `world` is inside the visible window (overscan included)
    pub fn contains(&self, world: Coord) -> bool {
        let dx = i64::from(world.x) - i64::from(self.origin.x);
        let dy = i64::from(world.y) - i64::from(self.origin.y);
        (0..i64::from(self.cols())).contains(&dx) && (0..i64::from(self.rows())).contains(&dy)
    }

    /// Pixel position of the top-left corner of a cell
    pub fn cell_origin_px(&self, cell: &VisibleCell) -> (u32, u32) {
        (
            cell.screen_x.saturating_mul(self.layout.tile_size()),
            cell.screen_y.saturating_mul(self.layout.tile_size()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_with_overscan() {
        let layout = ScreenLayout::new(16, 800, 600);
        let viewport = Viewport::new(layout, Camera::default());

        assert_eq!(viewport.cols(), 51);
        assert_eq!(viewport.rows(), 39);
        assert_eq!(viewport.visible_cells().count(), 51 * 39);
        assert_eq!(viewport.cell_count(), 51 * 39);
    }

    #[test]
    fn test_partial_tiles_round_up() {
        // 100 / 16 = 6.25 -> 7 + 1 overscan; 50 / 16 = 3.125 -> 4 + 1
        let layout = ScreenLayout::new(16, 100, 50);
        let viewport = Viewport::new(layout, Camera::at(Coord::new(-4, 9)));
        assert_eq!(viewport.visible_cells().count(), 8 * 5);
    }

    #[test]
    fn test_first_cell_is_camera() {
        let layout = ScreenLayout::new(16, 64, 32);
        let camera = Camera::at(Coord::new(-10, 42));
        let viewport = Viewport::new(layout, camera);

        let first = viewport.visible_cells().next().unwrap();
        assert_eq!((first.screen_x, first.screen_y), (0, 0));
        assert_eq!(first.world, Coord::new(-10, 42));

        let last = viewport.visible_cells().last().unwrap();
        assert_eq!((last.screen_x, last.screen_y), (4, 2));
        assert_eq!(last.world, Coord::new(-6, 44));
        assert_eq!(viewport.cell_origin_px(&last), (64, 32));
    }

    #[test]
    fn test_visible_cells_restartable() {
        let viewport = Viewport::new(ScreenLayout::new(8, 24, 24), Camera::at(Coord::new(3, 3)));
        let a: Vec<_> = viewport.visible_cells().collect();
        let b: Vec<_> = viewport.visible_cells().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains() {
        let viewport = Viewport::new(ScreenLayout::new(16, 32, 32), Camera::at(Coord::new(5, 5)));
        assert!(viewport.contains(Coord::new(5, 5)));
        assert!(viewport.contains(Coord::new(7, 7)));
        assert!(!viewport.contains(Coord::new(8, 5)));
        assert!(!viewport.contains(Coord::new(4, 5)));
    }

    #[test]
    fn test_layout_strips() {
        let layout = ScreenLayout::new(16, 800, 600);
        assert_eq!(layout.palette_top(), 600);
        assert_eq!(layout.palette_height(), 20);
        assert_eq!(layout.instruction_top(), 620);
        assert_eq!(layout.window_height(), 640);
    }

    #[test]
    fn test_oversized_layout_saturates() {
        let layout = ScreenLayout::new(u32::MAX, 800, u32::MAX).with_instruction_height(u32::MAX);
        assert_eq!(layout.tile_size(), MAX_TILE_SIZE);
        assert_eq!(layout.palette_height(), MAX_TILE_SIZE + PALETTE_PADDING);
        assert_eq!(layout.instruction_top(), u32::MAX);
        assert_eq!(layout.window_height(), u32::MAX);
    }

    #[test]
    fn test_zero_tile_size_is_clamped() {
        let layout = ScreenLayout::new(0, 10, 10);
        assert_eq!(layout.tile_size(), 1);
        assert_eq!(layout.cols(), 11);
    }
}
