//! Rules module for the fading Game of Life.
//!
//! The classic birth/survival thresholds decide *whether* a cell lives; the
//! cell's integer state then decides *how*: newborn cells start at `ALIVE`,
//! survivors age by one step up to `old_age`, and dying cells fade one step
//! per generation down to `DEAD` instead of vanishing at once.

use crate::cell::CellState;

/// Thresholds and aging cap for the transition rule.
///
/// 1. A dead or fading cell with exactly `birth_count` live neighbors is born.
/// 2. A cell with fewer than `survival_min` or more than `survival_max` live
///    neighbors, or one that is not alive, dies or keeps fading.
/// 3. Any other live cell survives and ages, capped at `old_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadingRules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u32,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u32,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u32,
    /// Highest state reachable by aging
    pub old_age: CellState,
}

impl Default for FadingRules {
    fn default() -> Self {
        // B3/S23 with aging up to OLD
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
            old_age: CellState::OLD,
        }
    }
}

impl FadingRules {
    /// Next state of a cell that was `old` and saw `live_neighbors` alive
    /// neighbors in the previous generation.
    pub fn next_state(&self, old: CellState, live_neighbors: u32) -> CellState {
        if live_neighbors == self.birth_count && !old.is_alive() {
            CellState::ALIVE
        } else if live_neighbors < self.survival_min
            || live_neighbors > self.survival_max
            || !old.is_alive()
        {
            old.faded()
        } else {
            old.aged(self.old_age)
        }
    }
}

/// The transition under the default rules.
pub fn transition(old: CellState, live_neighbors: u32) -> CellState {
    FadingRules::default().next_state(old, live_neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(v: u8) -> CellState {
        CellState::new(v).unwrap()
    }

    #[test]
    fn dead_cells_are_born_only_on_three() {
        for n in 0..=8 {
            let expected = if n == 3 { CellState::ALIVE } else { CellState::DEAD };
            assert_eq!(transition(CellState::DEAD, n), expected, "n = {n}");
        }
    }

    #[test]
    fn fading_cells_are_reborn_on_three() {
        for v in 1..8 {
            assert_eq!(transition(state(v), 3), CellState::ALIVE);
        }
    }

    #[test]
    fn fading_cells_step_down_otherwise() {
        for v in 1..8 {
            for n in (0..=8).filter(|&n| n != 3) {
                assert_eq!(transition(state(v), n), state(v - 1), "state {v}, n = {n}");
            }
        }
        assert_eq!(transition(state(1), 2), CellState::DEAD);
    }

    #[test]
    fn survivors_age_until_old() {
        for v in 8..16 {
            assert_eq!(transition(state(v), 2), state(v + 1));
            assert_eq!(transition(state(v), 3), state(v + 1));
        }
        assert_eq!(transition(CellState::OLD, 2), CellState::OLD);
        assert_eq!(transition(CellState::OLD, 3), CellState::OLD);
    }

    #[test]
    fn living_cells_die_from_alive_minus_one() {
        for v in 8..=17 {
            for n in [0, 1, 4, 5, 8] {
                assert_eq!(transition(state(v), n), state(7), "state {v}, n = {n}");
            }
        }
    }

    #[test]
    fn aliens_settle_into_old_age() {
        assert_eq!(transition(CellState::ALIEN, 2), CellState::OLD);
        assert_eq!(transition(CellState::ALIEN, 3), CellState::OLD);
    }

    #[test]
    fn rule_never_produces_alien() {
        for v in 0..CellState::COUNT as u8 {
            for n in 0..=8 {
                assert_ne!(transition(state(v), n), CellState::ALIEN);
            }
        }
    }

    #[test]
    fn custom_cap_limits_aging() {
        let rules = FadingRules {
            old_age: state(10),
            ..FadingRules::default()
        };
        assert_eq!(rules.next_state(state(9), 2), state(10));
        assert_eq!(rules.next_state(state(10), 2), state(10));
    }
}
