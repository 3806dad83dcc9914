//! Cell states for the fading Game of Life.
//!
//! A cell is a small integer in `[DEAD, ALIEN]`:
//! - `DEAD` (0) is the rest state
//! - `1..ALIVE` is a cell fading out, counting down toward `DEAD`
//! - `ALIVE..=OLD` is a living cell aging toward `OLD`
//! - `ALIEN` marks a cell that was just overwritten by a disturbance

use std::fmt;

/// A single cell value. Construction is checked, so every `CellState`
/// in the program lies in `[0, ALIEN]`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellState(u8);

impl CellState {
    pub const DEAD: CellState = CellState(0);
    pub const ALIVE: CellState = CellState(8);
    pub const OLD: CellState = CellState(2 * Self::ALIVE.0);
    pub const ALIEN: CellState = CellState(Self::OLD.0 + 1);

    /// Number of distinct states, `DEAD..=ALIEN`.
    pub const COUNT: usize = Self::ALIEN.0 as usize + 1;

    /// Returns `None` for values above `ALIEN`.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::ALIEN.0 {
            Some(CellState(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Alive for neighbor counting: any state at or above `ALIVE`,
    /// aged and alien cells included.
    pub const fn is_alive(self) -> bool {
        self.0 >= Self::ALIVE.0
    }

    pub const fn is_dead(self) -> bool {
        self.0 == Self::DEAD.0
    }

    pub const fn band(self) -> Band {
        if self.0 == Self::DEAD.0 {
            Band::Dead
        } else if self.0 < Self::ALIVE.0 {
            Band::Fading
        } else if self.0 <= Self::OLD.0 {
            Band::Living
        } else {
            Band::Disturbance
        }
    }

    /// One step further into the fade. `DEAD` stays `DEAD`; a living or
    /// alien cell drops its age and starts from `ALIVE - 1`.
    pub(crate) fn faded(self) -> Self {
        if self.is_dead() {
            Self::DEAD
        } else {
            CellState(self.0.min(Self::ALIVE.0) - 1)
        }
    }

    /// One step older, capped at `cap`.
    pub(crate) fn aged(self, cap: CellState) -> Self {
        CellState(self.0.saturating_add(1).min(cap.0))
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic band of a cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Dead,
    Fading,
    Living,
    Disturbance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_the_state_layout() {
        assert_eq!(CellState::ALIVE.value(), 8);
        assert_eq!(CellState::OLD.value(), 16);
        assert_eq!(CellState::ALIEN.value(), 17);
        assert_eq!(CellState::COUNT, 18);
    }

    #[test]
    fn new_rejects_values_above_alien() {
        assert_eq!(CellState::new(17), Some(CellState::ALIEN));
        assert_eq!(CellState::new(18), None);
        assert_eq!(CellState::new(255), None);
    }

    #[test]
    fn bands_cover_every_state() {
        for value in 0..CellState::COUNT as u8 {
            let state = CellState::new(value).unwrap();
            let expected = match value {
                0 => Band::Dead,
                1..=7 => Band::Fading,
                8..=16 => Band::Living,
                _ => Band::Disturbance,
            };
            assert_eq!(state.band(), expected, "state {value}");
            assert_eq!(state.is_alive(), value >= 8, "state {value}");
        }
    }

    #[test]
    fn fading_discards_age() {
        assert_eq!(CellState::OLD.faded(), CellState::new(7).unwrap());
        assert_eq!(CellState::ALIEN.faded(), CellState::new(7).unwrap());
        assert_eq!(CellState::new(1).unwrap().faded(), CellState::DEAD);
        assert_eq!(CellState::DEAD.faded(), CellState::DEAD);
    }
}
