use crate::cell::{Band, CellState};

/// RGBA, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Color of the one-pixel lines between cells.
pub const GRID_LINE: Rgba = [32, 32, 32, 255];

const YOUNG: Rgba = [0x00, 0xC0, 0x00, 0xFF];
const OLD: Rgba = [0x00, 0x20, 0xC0, 0xFF];
const ALIEN: Rgba = [0xC0, 0x00, 0x00, 0xFF];

/// Fixed state → color lookup, built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: [Rgba; CellState::COUNT],
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTable {
    pub fn new() -> Self {
        let mut colors = [[0, 0, 0, 0xFF]; CellState::COUNT];
        for (i, color) in colors.iter_mut().enumerate() {
            let Some(state) = CellState::new(i as u8) else {
                continue;
            };
            *color = match state.band() {
                Band::Dead => [0, 0, 0, 0xFF],
                Band::Fading => {
                    // gray ramp
                    let level = state.value() * 16;
                    [level, level, level, 0xFF]
                }
                Band::Living if state == CellState::OLD => OLD,
                Band::Living => YOUNG,
                Band::Disturbance => ALIEN,
            };
        }
        Self { colors }
    }

    pub fn get(&self, state: CellState) -> Rgba {
        self.colors[state.index()]
    }
}
