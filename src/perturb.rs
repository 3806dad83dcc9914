//! Periodic injection of alien cells.

use rand::Rng;

use crate::cell::CellState;
use crate::error::SimError;
use crate::grid::{Buffer, Grid};

pub const DEFAULT_PERIOD: u64 = 1024;
pub const DEFAULT_DIVISOR: u64 = 30;

/// Every `period` generations, overwrites `cells / divisor` random cells
/// of the current buffer with `ALIEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perturbation {
    period: u64,
    divisor: u64,
}

impl Default for Perturbation {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            divisor: DEFAULT_DIVISOR,
        }
    }
}

impl Perturbation {
    pub fn new(period: u64, divisor: u64) -> Result<Self, SimError> {
        if period == 0 {
            return Err(SimError::InvalidPeriod { name: "period" });
        }
        if divisor == 0 {
            return Err(SimError::InvalidPeriod { name: "divisor" });
        }
        Ok(Self { period, divisor })
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// Whether the step that completed `generation` should fire.
    pub fn is_due(&self, generation: u64) -> bool {
        generation % self.period == 0
    }

    /// Number of `ALIEN` writes one firing performs on a `width x height` grid.
    pub fn writes_for(&self, width: u32, height: u32) -> usize {
        (u64::from(width) * u64::from(height) / self.divisor) as usize
    }

    /// The generation value from which the next completed step fires.
    pub fn arm(&self, generation: u64) -> u64 {
        (generation / self.period + 1) * self.period - 1
    }

    /// Writes `ALIEN` at uniformly random coordinates, with replacement.
    /// Returns the number of writes.
    pub fn inject<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let writes = self.writes_for(grid.width(), grid.height());
        for _ in 0..writes {
            let x = rng.random_range(0..grid.width());
            let y = rng.random_range(0..grid.height());
            grid.set(Buffer::Current, i64::from(x), i64::from(y), CellState::ALIEN);
        }
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fires_on_multiples_of_the_period() {
        let p = Perturbation::default();
        assert!(p.is_due(0));
        assert!(!p.is_due(1));
        assert!(!p.is_due(1023));
        assert!(p.is_due(1024));
        assert!(p.is_due(4096));
    }

    #[test]
    fn writes_are_floored() {
        let p = Perturbation::default();
        assert_eq!(p.writes_for(192, 192), 1228);
        assert_eq!(p.writes_for(5, 5), 0);
        assert_eq!(p.writes_for(6, 5), 1);
    }

    #[test]
    fn arm_lands_one_before_the_next_multiple() {
        let p = Perturbation::default();
        assert_eq!(p.arm(0), 1023);
        assert_eq!(p.arm(500), 1023);
        assert_eq!(p.arm(1023), 1023);
        assert_eq!(p.arm(1024), 2047);
        assert!(p.is_due(p.arm(77) + 1));
    }

    #[test]
    fn zero_period_or_divisor_is_rejected() {
        assert!(Perturbation::new(0, 30).is_err());
        assert!(Perturbation::new(1024, 0).is_err());
        assert!(Perturbation::new(1, 1).is_ok());
    }

    #[test]
    fn inject_only_writes_aliens_into_the_current_buffer() {
        let mut grid = Grid::new(30, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let writes = Perturbation::default().inject(&mut grid, &mut rng);
        assert_eq!(writes, 20);

        let aliens = grid
            .cells()
            .iter()
            .filter(|&&c| c == CellState::ALIEN)
            .count();
        assert!(aliens >= 1 && aliens <= writes);
        assert!(grid.cells().iter().all(|&c| c == CellState::ALIEN || c.is_dead()));
        assert!(grid.view(Buffer::Previous).cells().iter().all(|c| c.is_dead()));
    }
}
