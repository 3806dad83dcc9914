use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised while building or rebuilding the simulation.
///
/// Coordinates never fail (the grid wraps), so everything here is either
/// a bad startup parameter or running out of memory.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("a {width}x{height} grid has more cells than can be addressed")]
    TooLarge { width: u32, height: u32 },

    #[error("failed to allocate cell buffers for a {width}x{height} grid")]
    Allocation {
        width: u32,
        height: u32,
        #[source]
        source: TryReserveError,
    },

    #[error("seed density must be within 0..=1, got {0}")]
    InvalidDensity(f64),

    #[error("perturbation {name} must be at least 1")]
    InvalidPeriod { name: &'static str },
}
