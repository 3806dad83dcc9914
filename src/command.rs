/// Discrete user commands, produced by the input layer once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleSimulation,
    StepOnce,
    ClearAll,
    /// Arrange for the next step to inject alien cells.
    TriggerPerturbationSoon,
    SpeedUp,
    SpeedDown,
    ZoomIn,
    ZoomOut,
    /// Toggle the cell under a window pixel.
    PaintCell { x: u32, y: u32 },
}
