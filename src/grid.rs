//! Toroidal double-buffered cell storage.

use rand::Rng;

use crate::cell::CellState;
use crate::error::SimError;

/// Selects one of the grid's two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// The buffer holding the latest generation; the only one a renderer sees.
    Current,
    /// Scratch for the generation being computed.
    Previous,
}

/// Wraps `c` onto `0..n` for any integer, negative included.
#[inline]
pub fn wrap(c: i64, n: u32) -> usize {
    c.rem_euclid(i64::from(n)) as usize
}

/// Read-only view of one buffer with toroidal addressing.
#[derive(Clone, Copy)]
pub struct CellsView<'a> {
    width: u32,
    height: u32,
    cells: &'a [CellState],
}

impl<'a> CellsView<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raster-ordered cells (`y * width + x`).
    pub fn cells(&self) -> &'a [CellState] {
        self.cells
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> CellState {
        self.cells[index(self.width, wrap(x, self.width), wrap(y, self.height))]
    }

    #[inline]
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_alive()
    }

    /// Count of the 8 wrapped neighbors of `(x, y)` that are alive. Each
    /// neighbor counts once whatever its age. Any coordinate is accepted and
    /// wrapped first.
    pub fn live_neighbors(&self, x: i64, y: i64) -> u32 {
        let (w, h) = (self.width as usize, self.height as usize);
        let (cx, cy) = (wrap(x, self.width), wrap(y, self.height));
        let rows = [(cy + h - 1) % h, cy, (cy + 1) % h];
        let cols = [(cx + w - 1) % w, cx, (cx + 1) % w];

        let mut count = 0;
        for (dy, &ny) in rows.iter().enumerate() {
            for (dx, &nx) in cols.iter().enumerate() {
                if dx == 1 && dy == 1 {
                    continue;
                }
                if self.cells[ny * w + nx].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }
}

#[inline]
fn index(width: u32, x: usize, y: usize) -> usize {
    y * width as usize + x
}

/// Two equally sized buffers of cell states plus a tag naming the current one.
///
/// Swapping flips the tag; the buffers themselves never move.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    buffers: [Vec<CellState>; 2],
    current: usize,
}

impl Grid {
    /// Allocates both buffers filled with `DEAD`.
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyGrid { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(SimError::TooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            buffers: [allocate(width, height, len)?, allocate(width, height, len)?],
            current: 0,
        })
    }

    /// Builds a grid whose current buffer holds `cells` in raster order.
    /// Returns `None` if the length does not match the dimensions.
    pub fn from_cells(width: u32, height: u32, cells: Vec<CellState>) -> Option<Self> {
        if width == 0 || height == 0 || cells.len() != width as usize * height as usize {
            return None;
        }
        let previous = vec![CellState::DEAD; cells.len()];
        Some(Self {
            width,
            height,
            buffers: [cells, previous],
            current: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, buffer: Buffer) -> usize {
        match buffer {
            Buffer::Current => self.current,
            Buffer::Previous => 1 - self.current,
        }
    }

    pub fn view(&self, buffer: Buffer) -> CellsView<'_> {
        CellsView {
            width: self.width,
            height: self.height,
            cells: &self.buffers[self.slot(buffer)],
        }
    }

    /// The current buffer in raster order.
    pub fn cells(&self) -> &[CellState] {
        &self.buffers[self.current]
    }

    pub fn get(&self, x: i64, y: i64) -> CellState {
        self.view(Buffer::Current).get(x, y)
    }

    pub fn get_in(&self, buffer: Buffer, x: i64, y: i64) -> CellState {
        self.view(buffer).get(x, y)
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_alive()
    }

    pub fn set(&mut self, buffer: Buffer, x: i64, y: i64, state: CellState) {
        let i = index(self.width, wrap(x, self.width), wrap(y, self.height));
        let slot = self.slot(buffer);
        self.buffers[slot][i] = state;
    }

    pub fn live_neighbors(&self, x: i64, y: i64) -> u32 {
        self.view(Buffer::Current).live_neighbors(x, y)
    }

    /// Alive cells in the current buffer.
    pub fn population(&self) -> usize {
        self.view(Buffer::Current).population()
    }

    /// Flips which buffer is current.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Read access to the previous buffer alongside write access to the
    /// current one, for computing a generation in a single pass.
    pub fn split_for_step(&mut self) -> (CellsView<'_>, &mut [CellState]) {
        let (width, height) = (self.width, self.height);
        let [first, second] = &mut self.buffers;
        let (previous, current) = if self.current == 0 {
            (second, first)
        } else {
            (first, second)
        };
        (
            CellsView {
                width,
                height,
                cells: previous.as_slice(),
            },
            current.as_mut_slice(),
        )
    }

    /// Sets every cell of the current buffer to `DEAD`.
    pub fn clear(&mut self) {
        let slot = self.current;
        self.buffers[slot].fill(CellState::DEAD);
    }

    /// Reseeds the current buffer with independent draws: `ALIVE` with
    /// probability `density`, otherwise `DEAD`. The previous buffer is cleared.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        // NaN seeds nothing.
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let current = self.current;
        for cell in self.buffers[current].iter_mut() {
            *cell = if rng.random_bool(density) {
                CellState::ALIVE
            } else {
                CellState::DEAD
            };
        }
        self.buffers[1 - current].fill(CellState::DEAD);
    }
}

fn allocate(width: u32, height: u32, len: usize) -> Result<Vec<CellState>, SimError> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|source| SimError::Allocation {
            width,
            height,
            source,
        })?;
    cells.resize(len, CellState::DEAD);
    Ok(cells)
}
