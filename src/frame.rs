//! Read-only frames handed to render sinks, and a software RGBA sink.

use crate::cell::CellState;
use crate::colors::{ColorTable, Rgba, GRID_LINE};

/// One generation as seen by a renderer. Borrowing the cells ties the frame
/// to a single render call; it cannot outlive the next step.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub cells: &'a [CellState],
    pub colors: &'a ColorTable,
}

/// A filled square for one cell, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub color: Rgba,
}

impl<'a> Frame<'a> {
    /// Size of the drawn area in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width * self.cell_size, self.height * self.cell_size)
    }

    /// Rectangles in raster order. Each leaves a one-pixel gap on its right
    /// and bottom edge for the grid line.
    pub fn cell_rects(&self) -> impl Iterator<Item = CellRect> + 'a {
        let (width, cell_size, colors) = (self.width, self.cell_size, self.colors);
        let size = cell_size.saturating_sub(1).max(1);
        let cells: &'a [CellState] = self.cells;
        cells.iter().enumerate().map(move |(i, &state)| {
            let i = i as u32;
            CellRect {
                x: cell_size * (i % width),
                y: cell_size * (i / width),
                size,
                color: colors.get(state),
            }
        })
    }
}

/// Consumer of rendered generations.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// CPU-side RGBA image of the grid, rebuilt on every `present`.
#[derive(Debug, Default, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Tightly packed RGBA8 rows, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn fill_rect(&mut self, rect: &CellRect) {
        let x_end = (rect.x + rect.size).min(self.width);
        let y_end = (rect.y + rect.size).min(self.height);
        for y in rect.y..y_end {
            let row = (y * self.width) as usize;
            self.pixels[row + rect.x as usize..row + x_end as usize].fill(rect.color);
        }
    }
}

impl FrameSink for PixelCanvas {
    fn present(&mut self, frame: &Frame<'_>) {
        let (width, height) = frame.pixel_size();
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.pixels = vec![GRID_LINE; width as usize * height as usize];
        } else {
            self.pixels.fill(GRID_LINE);
        }
        for rect in frame.cell_rects() {
            self.fill_rect(&rect);
        }
    }
}
