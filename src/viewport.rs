//! Viewport size and the cell pixel size range used by the resize policy.

pub const MIN_CELL_SIZE: u32 = 1;
pub const MAX_CELL_SIZE: u32 = 128;

/// Pixel size of the drawable area the grid is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Grid dimensions for `cell_size`: integer division, at least one cell per axis.
    pub fn grid_dimensions(&self, cell_size: u32) -> (u32, u32) {
        let cell_size = cell_size.max(1);
        (
            (self.width / cell_size).max(1),
            (self.height / cell_size).max(1),
        )
    }
}

pub fn is_valid_cell_size(cell_size: u32) -> bool {
    (MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&cell_size)
}

/// Cell size after zooming in, if still in range.
pub fn zoomed_in(cell_size: u32) -> Option<u32> {
    cell_size
        .checked_mul(2)
        .filter(|&size| is_valid_cell_size(size))
}

/// Cell size after zooming out, if still in range.
pub fn zoomed_out(cell_size: u32) -> Option<u32> {
    Some(cell_size / 2).filter(|&size| is_valid_cell_size(size))
}
