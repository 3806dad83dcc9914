// Declare modules directly in the binary crate root
pub mod hud;
pub mod input;
pub mod render;
pub mod state;

use crate::state::State;

use clap::Parser;
use fading_life::{Command, Config, Flow, SimError};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("could not create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    IncompatibleSurface,
    #[error("could not open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("graphics device ran out of memory")]
    OutOfMemory,
    #[error(transparent)]
    Simulation(#[from] SimError),
}

/// Applies commands in order, stopping the loop on quit or failure.
fn dispatch(
    state: &mut State,
    commands: impl IntoIterator<Item = Command>,
    window_target: &EventLoopWindowTarget<()>,
    failure: &mut Option<AppError>,
) {
    for command in commands {
        match state.controller.handle(command) {
            Ok(Flow::Continue) => state.window.request_redraw(),
            Ok(Flow::Quit) => {
                log::info!("Quit requested");
                window_target.exit();
                return;
            }
            Err(e) => {
                log::error!("{}", e);
                *failure = Some(e.into());
                window_target.exit();
                return;
            }
        }
    }
}

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, config: Config) -> Result<(), AppError> {
    let mut state = State::new(window, &config).await?;
    let mut failure: Option<AppError> = None;

    event_loop.run(|event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event } if window_id == state.window.id() => {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);
                if response.repaint {
                    state.window.request_redraw();
                }

                // The game still needs resizes, redraws and close requests
                // even when egui has used them.
                let consumed_by_egui = response.consumed
                    && !matches!(
                        event,
                        WindowEvent::Resized(_)
                            | WindowEvent::RedrawRequested
                            | WindowEvent::CloseRequested
                    );
                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => window_target.exit(),
                    WindowEvent::Resized(new_size) => {
                        if let Err(e) = state.resize(*new_size) {
                            log::error!("{}", e);
                            failure = Some(e.into());
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => match state.render() {
                        Ok(commands) => dispatch(&mut state, commands, window_target, &mut failure),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory");
                            failure = Some(AppError::OutOfMemory);
                            window_target.exit();
                        }
                        Err(e) => {
                            log::warn!("Skipping frame due to surface {:?}", e);
                            state.window.request_redraw();
                        }
                    },
                    other => {
                        if let Some(command) = input::command_for(&mut state.input, other) {
                            dispatch(&mut state, Some(command), window_target, &mut failure);
                        }
                    }
                }
            }
            Event::AboutToWait => {
                if state.controller.tick(Instant::now()) {
                    state.window.request_redraw();
                }
                if let Some(next) = state.controller.next_tick() {
                    window_target.set_control_flow(ControlFlow::WaitUntil(next));
                }
            }
            _ => (),
        }
    })?;

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();
    log::info!(
        "Starting {}x{} window, cell size {}px, {} steps/s",
        config.width,
        config.height,
        config.cell_size,
        config.speed
    );

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Fading Life")
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, config))
}
