//! The step engine and the grid (re)initialization policy.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cell::CellState;
use crate::error::SimError;
use crate::grid::{Buffer, Grid};
use crate::perturb::Perturbation;
use crate::rules::FadingRules;
use crate::viewport::{is_valid_cell_size, Viewport, MAX_CELL_SIZE, MIN_CELL_SIZE};

pub const DEFAULT_DENSITY: f64 = 0.2;

/// Outcome of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    /// Alive cells produced by the rule, before any perturbation.
    pub population: usize,
    /// Number of `ALIEN` writes, if the perturbation fired on this step.
    pub perturbed: Option<usize>,
}

/// Parameters that survive a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub viewport: Viewport,
    pub cell_size: u32,
    pub density: f64,
    pub rules: FadingRules,
    pub perturbation: Perturbation,
}

impl Settings {
    pub fn new(viewport: Viewport, cell_size: u32) -> Self {
        Self {
            viewport,
            cell_size,
            density: DEFAULT_DENSITY,
            rules: FadingRules::default(),
            perturbation: Perturbation::default(),
        }
    }
}

pub struct Simulation {
    grid: Grid,
    settings: Settings,
    generation: u64,
    rng: StdRng,
}

impl Simulation {
    /// Builds and seeds a grid fitted to the viewport, using OS entropy.
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Same as [`Simulation::new`] with a reproducible random stream.
    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, mut rng: StdRng) -> Result<Self, SimError> {
        if !(0.0..=1.0).contains(&settings.density) {
            return Err(SimError::InvalidDensity(settings.density));
        }
        let cell_size = settings.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let settings = Settings {
            cell_size,
            ..settings
        };
        let grid = seeded_grid(&settings, &mut rng)?;
        log::info!(
            "Created {}x{} grid (cell size {}px)",
            grid.width(),
            grid.height(),
            settings.cell_size
        );
        Ok(Self {
            grid,
            settings,
            generation: 0,
            rng,
        })
    }

    /// Wraps an existing grid; no seeding happens. The viewport is taken to be
    /// exactly the grid at `cell_size`.
    pub fn from_grid(grid: Grid, cell_size: u32, seed: u64) -> Self {
        let cell_size = cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let viewport = Viewport::new(
            grid.width().saturating_mul(cell_size),
            grid.height().saturating_mul(cell_size),
        );
        Self {
            grid,
            settings: Settings::new(viewport, cell_size),
            generation: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell_size(&self) -> u32 {
        self.settings.cell_size
    }

    pub fn set_perturbation(&mut self, perturbation: Perturbation) {
        self.settings.perturbation = perturbation;
    }

    /// Advances one generation.
    ///
    /// The buffers swap first, so the previous generation is read from the
    /// scratch buffer while the new one is written into the visible buffer.
    /// Perturbation, when due, runs after the whole pass.
    pub fn step(&mut self) -> StepReport {
        self.grid.swap();

        let rules = self.settings.rules;
        let (previous, current) = self.grid.split_for_step();
        let (width, height) = (previous.width(), previous.height());
        let old_cells = previous.cells();

        let mut population = 0;
        for y in 0..height {
            let row = y as usize * width as usize;
            for x in 0..width {
                let i = row + x as usize;
                let next = rules.next_state(old_cells[i], previous.live_neighbors(i64::from(x), i64::from(y)));
                if next.is_alive() {
                    population += 1;
                }
                current[i] = next;
            }
        }

        self.generation += 1;

        let perturbation = self.settings.perturbation;
        let perturbed = if perturbation.is_due(self.generation) {
            let writes = perturbation.inject(&mut self.grid, &mut self.rng);
            log::debug!(
                "Generation {}: injected {} alien cells",
                self.generation,
                writes
            );
            Some(writes)
        } else {
            None
        };

        StepReport {
            generation: self.generation,
            population,
            perturbed,
        }
    }

    /// Rebuilds the grid for a new cell pixel size. Sizes outside the allowed
    /// range are ignored and `Ok(false)` is returned.
    pub fn resize(&mut self, cell_size: u32) -> Result<bool, SimError> {
        if !is_valid_cell_size(cell_size) {
            log::debug!("Ignoring resize to out-of-range cell size {}", cell_size);
            return Ok(false);
        }
        self.reinitialize(Settings {
            cell_size,
            ..self.settings
        })?;
        Ok(true)
    }

    /// Rebuilds the grid for a new viewport at the current cell size.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), SimError> {
        self.reinitialize(Settings {
            viewport,
            ..self.settings
        })
    }

    fn reinitialize(&mut self, settings: Settings) -> Result<(), SimError> {
        let grid = seeded_grid(&settings, &mut self.rng)?;
        log::info!(
            "Reinitialized grid to {}x{} (cell size {}px)",
            grid.width(),
            grid.height(),
            settings.cell_size
        );
        self.grid = grid;
        self.settings = settings;
        self.generation = 0;
        Ok(())
    }

    /// Kills every cell. The generation counter keeps running.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Toggles the cell under pixel `(px, py)` between `DEAD` and `ALIVE`.
    pub fn paint(&mut self, px: u32, py: u32) -> CellState {
        let x = i64::from(px / self.settings.cell_size);
        let y = i64::from(py / self.settings.cell_size);
        let state = if self.grid.is_alive(x, y) {
            CellState::DEAD
        } else {
            CellState::ALIVE
        };
        self.grid.set(Buffer::Current, x, y, state);
        state
    }

    /// Moves the generation counter forward so the next completed step
    /// triggers the perturbation.
    pub fn perturb_soon(&mut self) {
        self.generation = self.settings.perturbation.arm(self.generation);
    }
}

fn seeded_grid(settings: &Settings, rng: &mut StdRng) -> Result<Grid, SimError> {
    let (width, height) = settings.viewport.grid_dimensions(settings.cell_size);
    let mut grid = Grid::new(width, height)?;
    grid.seed_random(rng, settings.density);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_grid() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        for x in 0..3 {
            grid.set(Buffer::Current, x, 0, CellState::ALIVE);
        }
        grid
    }

    fn blinker() -> Simulation {
        let mut grid = Grid::new(5, 5).unwrap();
        for x in 1..4 {
            grid.set(Buffer::Current, x, 2, CellState::ALIVE);
        }
        Simulation::from_grid(grid, 4, 1)
    }

    #[test]
    fn from_grid_saturates_an_oversized_viewport() {
        let grid = Grid::new(1 << 25, 1).unwrap();
        let sim = Simulation::from_grid(grid, 128, 0);
        assert_eq!(sim.settings().viewport, Viewport::new(u32::MAX, 128));
        assert_eq!(sim.cell_size(), 128);
    }

    #[test]
    fn blinker_oscillates_and_ages_its_center() {
        let mut sim = blinker();
        sim.step();
        let grid = sim.grid();
        assert_eq!(grid.get(2, 1), CellState::ALIVE);
        assert_eq!(grid.get(2, 2), CellState::new(9).unwrap());
        assert_eq!(grid.get(2, 3), CellState::ALIVE);
        assert_eq!(grid.get(1, 2), CellState::new(7).unwrap());
        assert_eq!(grid.get(3, 2), CellState::new(7).unwrap());

        sim.step();
        let grid = sim.grid();
        assert_eq!(grid.get(1, 2), CellState::ALIVE);
        assert_eq!(grid.get(2, 2), CellState::new(10).unwrap());
        assert_eq!(grid.get(2, 1), CellState::new(7).unwrap());
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn three_by_three_row_scenario() {
        let mut sim = Simulation::from_grid(row_grid(), 1, 1);

        let report = sim.step();
        assert_eq!(report.population, 9);
        for x in 0..3 {
            // Row cells see the two other row cells and survive.
            assert_eq!(sim.grid().get(x, 0), CellState::new(9).unwrap());
            assert_eq!(sim.grid().get(x, 1), CellState::ALIVE);
            assert_eq!(sim.grid().get(x, 2), CellState::ALIVE);
        }

        // Every cell now has 8 alive neighbors and starts to fade.
        let report = sim.step();
        assert_eq!(report.population, 0);
        assert!(sim
            .grid()
            .cells()
            .iter()
            .all(|&c| c == CellState::new(7).unwrap()));
    }

    #[test]
    fn step_reads_only_the_previous_generation() {
        // A horizontal pair would grow in place if writes leaked into reads.
        let mut grid = Grid::new(6, 6).unwrap();
        grid.set(Buffer::Current, 1, 1, CellState::ALIVE);
        grid.set(Buffer::Current, 2, 1, CellState::ALIVE);
        let mut sim = Simulation::from_grid(grid, 1, 9);
        let report = sim.step();
        assert_eq!(report.population, 0);
        assert_eq!(sim.grid().get(1, 1), CellState::new(7).unwrap());
        assert_eq!(sim.grid().get(2, 1), CellState::new(7).unwrap());
    }

    #[test]
    fn perturbation_fires_once_in_the_first_period() {
        let mut grid = Grid::new(60, 30).unwrap();
        grid.set(Buffer::Current, 0, 0, CellState::ALIVE);
        let mut sim = Simulation::from_grid(grid, 1, 42);

        let mut fired = Vec::new();
        for _ in 0..1024 {
            let report = sim.step();
            if let Some(writes) = report.perturbed {
                fired.push((report.generation, writes));
            }
        }
        assert_eq!(fired, vec![(1024, 60)]);
        let aliens = sim
            .grid()
            .cells()
            .iter()
            .filter(|&&c| c == CellState::ALIEN)
            .count();
        assert!(aliens >= 1 && aliens <= 60);
    }

    #[test]
    fn perturb_soon_fires_on_the_next_step() {
        let mut sim = blinker();
        sim.step();
        sim.perturb_soon();
        assert_eq!(sim.generation(), 1023);
        let report = sim.step();
        assert_eq!(report.generation, 1024);
        assert_eq!(report.perturbed, Some(0));

        let mut sim = Simulation::from_grid(Grid::new(30, 30).unwrap(), 1, 5);
        sim.perturb_soon();
        assert_eq!(sim.step().perturbed, Some(30));
    }

    #[test]
    fn resize_recomputes_dimensions_and_resets() {
        let settings = Settings::new(Viewport::new(768, 512), 4);
        let mut sim = Simulation::with_seed(settings, 11).unwrap();
        assert_eq!((sim.grid().width(), sim.grid().height()), (192, 128));
        sim.step();

        assert!(sim.resize(16).unwrap());
        assert_eq!((sim.grid().width(), sim.grid().height()), (48, 32));
        assert_eq!(sim.cell_size(), 16);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn out_of_range_resize_is_ignored() {
        let settings = Settings::new(Viewport::new(100, 100), 10);
        let mut sim = Simulation::with_seed(settings, 2).unwrap();
        let before = sim.grid().cells().to_vec();
        assert!(!sim.resize(0).unwrap());
        assert!(!sim.resize(129).unwrap());
        assert_eq!(sim.grid().cells(), before.as_slice());
        assert_eq!(sim.cell_size(), 10);
    }

    #[test]
    fn invalid_density_is_rejected() {
        let mut settings = Settings::new(Viewport::new(100, 100), 10);
        settings.density = 1.5;
        assert!(matches!(
            Simulation::with_seed(settings, 0),
            Err(SimError::InvalidDensity(_))
        ));
        settings.density = f64::NAN;
        assert!(Simulation::with_seed(settings, 0).is_err());
    }

    #[test]
    fn paint_toggles_using_pixel_coordinates() {
        let mut sim = Simulation::from_grid(Grid::new(10, 10).unwrap(), 8, 0);
        assert_eq!(sim.paint(17, 9), CellState::ALIVE);
        assert_eq!(sim.grid().get(2, 1), CellState::ALIVE);
        assert_eq!(sim.paint(23, 15), CellState::DEAD);
        assert_eq!(sim.grid().get(2, 1), CellState::DEAD);
    }

    #[test]
    fn clear_keeps_the_generation() {
        let mut sim = blinker();
        sim.step();
        sim.clear();
        assert_eq!(sim.grid().population(), 0);
        assert_eq!(sim.generation(), 1);
    }
}
