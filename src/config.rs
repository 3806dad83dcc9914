use clap::Parser;

use crate::error::SimError;
use crate::perturb::{Perturbation, DEFAULT_DIVISOR, DEFAULT_PERIOD};
use crate::simulation::{Settings, DEFAULT_DENSITY};
use crate::viewport::{Viewport, MAX_CELL_SIZE, MIN_CELL_SIZE};

pub const DEFAULT_WINDOW_SIZE: u32 = 768;
pub const DEFAULT_CELL_SIZE: u32 = 4;
pub const DEFAULT_SPEED: u32 = 20;
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 100;

/// Command-line options for the fading Game of Life window.
#[derive(Debug, Clone, Parser)]
#[command(name = "fading_life", version, about = "Game of Life with fading, aging and alien cells")]
pub struct Config {
    /// Window width in pixels.
    #[arg(
        long,
        env = "FADING_LIFE_WIDTH",
        default_value_t = DEFAULT_WINDOW_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Window height in pixels.
    #[arg(
        long,
        env = "FADING_LIFE_HEIGHT",
        default_value_t = DEFAULT_WINDOW_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub height: u32,

    /// Edge length of one cell in pixels.
    #[arg(
        long,
        env = "FADING_LIFE_CELL_SIZE",
        default_value_t = DEFAULT_CELL_SIZE,
        value_parser = clap::value_parser!(u32).range(MIN_CELL_SIZE as i64..=MAX_CELL_SIZE as i64)
    )]
    pub cell_size: u32,

    /// Generations per second while running.
    #[arg(
        long,
        env = "FADING_LIFE_SPEED",
        default_value_t = DEFAULT_SPEED,
        value_parser = clap::value_parser!(u32).range(MIN_SPEED as i64..=MAX_SPEED as i64)
    )]
    pub speed: u32,

    /// Fraction of cells seeded alive.
    #[arg(long, env = "FADING_LIFE_DENSITY", default_value_t = DEFAULT_DENSITY, value_parser = parse_density)]
    pub density: f64,

    /// Seed for the random stream; OS entropy when omitted.
    #[arg(long, env = "FADING_LIFE_SEED")]
    pub seed: Option<u64>,

    /// Start with the simulation running instead of paused.
    #[arg(long, env = "FADING_LIFE_RUNNING")]
    pub running: bool,

    /// Generations between alien injections.
    #[arg(
        long,
        env = "FADING_LIFE_PERTURB_PERIOD",
        default_value_t = DEFAULT_PERIOD,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub perturb_period: u64,

    /// One alien write per this many cells on each injection.
    #[arg(
        long,
        env = "FADING_LIFE_PERTURB_DIVISOR",
        default_value_t = DEFAULT_DIVISOR,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub perturb_divisor: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_SIZE,
            height: DEFAULT_WINDOW_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
            seed: None,
            running: false,
            perturb_period: DEFAULT_PERIOD,
            perturb_divisor: DEFAULT_DIVISOR,
        }
    }
}

impl Config {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn settings(&self) -> Result<Settings, SimError> {
        let mut settings = Settings::new(self.viewport(), self.cell_size);
        settings.density = self.density;
        settings.perturbation = Perturbation::new(self.perturb_period, self.perturb_divisor)?;
        Ok(settings)
    }
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("{density} is not within 0..=1"))
    }
}
