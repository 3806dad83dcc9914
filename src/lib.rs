//! Fading Game of Life: a multi-state Conway automaton on a torus.
//!
//! Cells fade through gray states instead of dying at once, survivors age
//! toward an old-age state, and every so often a burst of alien cells is
//! dropped on the board so it never settles. The engine is display-free;
//! renderers consume [`frame::Frame`]s through the [`frame::FrameSink`] trait.

pub mod cell;
pub mod colors;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod grid;
pub mod perturb;
pub mod rules;
pub mod simulation;
pub mod viewport;

pub use cell::CellState;
pub use command::Command;
pub use config::Config;
pub use controller::{Controller, Flow};
pub use error::SimError;
pub use frame::{Frame, FrameSink, PixelCanvas};
pub use grid::{Buffer, Grid};
pub use rules::{transition, FadingRules};
pub use simulation::{Settings, Simulation, StepReport};
