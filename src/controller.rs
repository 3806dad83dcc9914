//! The driver state machine between input commands and the simulation.

use std::time::{Duration, Instant};

use crate::colors::ColorTable;
use crate::command::Command;
use crate::config::{Config, MAX_SPEED, MIN_SPEED};
use crate::error::SimError;
use crate::frame::{Frame, FrameSink};
use crate::simulation::{Simulation, StepReport};
use crate::viewport::{zoomed_in, zoomed_out, Viewport};

/// Whether the driving loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller {
    simulation: Simulation,
    colors: ColorTable,
    running: bool,
    speed: u32,
    next_tick: Option<Instant>,
    last_report: Option<StepReport>,
}

impl Controller {
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let settings = config.settings()?;
        let simulation = match config.seed {
            Some(seed) => Simulation::with_seed(settings, seed)?,
            None => Simulation::new(settings)?,
        };
        Ok(Self::with_simulation(simulation, config.speed, config.running))
    }

    pub fn with_simulation(simulation: Simulation, speed: u32, running: bool) -> Self {
        Self {
            simulation,
            colors: ColorTable::new(),
            running,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            next_tick: None,
            last_report: None,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Steps per second.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn last_report(&self) -> Option<StepReport> {
        self.last_report
    }

    /// Time between frames at the current speed.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed))
    }

    /// Applies one command. Only grid reallocation can fail.
    pub fn handle(&mut self, command: Command) -> Result<Flow, SimError> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::ToggleSimulation => {
                self.running = !self.running;
                log::info!("Simulation {}", if self.running { "running" } else { "paused" });
            }
            Command::StepOnce => {
                self.step();
            }
            Command::ClearAll => {
                self.simulation.clear();
                log::info!("Cleared grid");
            }
            Command::TriggerPerturbationSoon => {
                self.simulation.perturb_soon();
                log::info!("Alien injection armed for the next generation");
            }
            Command::SpeedUp => self.set_speed(self.speed + 1),
            Command::SpeedDown => self.set_speed(self.speed.saturating_sub(1)),
            Command::ZoomIn => self.zoom(zoomed_in(self.simulation.cell_size()))?,
            Command::ZoomOut => self.zoom(zoomed_out(self.simulation.cell_size()))?,
            Command::PaintCell { x, y } => {
                self.simulation.paint(x, y);
            }
        }
        Ok(Flow::Continue)
    }

    fn set_speed(&mut self, speed: u32) {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        if speed != self.speed {
            self.speed = speed;
            log::info!("Speed: {} steps/s", speed);
        }
    }

    fn zoom(&mut self, cell_size: Option<u32>) -> Result<(), SimError> {
        match cell_size {
            Some(cell_size) => {
                if self.simulation.resize(cell_size)? {
                    self.last_report = None;
                    log::info!("Zoom: cell size {}px", cell_size);
                }
            }
            None => log::debug!("Zoom limit reached at {}px", self.simulation.cell_size()),
        }
        Ok(())
    }

    /// Reinitializes the grid for a new window size.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> Result<(), SimError> {
        self.last_report = None;
        self.simulation.set_viewport(Viewport::new(width, height))
    }

    fn step(&mut self) -> StepReport {
        let report = self.simulation.step();
        self.last_report = Some(report);
        report
    }

    /// Advances the frame clock. Returns `true` when a frame is due; a due
    /// frame also steps the simulation if it is running.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(next) if now < next => false,
            _ => {
                self.next_tick = Some(now + self.frame_interval());
                if self.running {
                    self.step();
                }
                true
            }
        }
    }

    /// When the next frame is due, if the clock has started.
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Hands the current generation to `sink`.
    pub fn render<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        let grid = self.simulation.grid();
        sink.present(&Frame {
            width: grid.width(),
            height: grid.height(),
            cell_size: self.simulation.cell_size(),
            cells: grid.cells(),
            colors: &self.colors,
        });
    }
}
