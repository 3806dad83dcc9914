use fading_life::Command;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{Key, NamedKey},
};

/// Scroll distance, in lines, that triggers one zoom step.
const ZOOM_SCROLL_STEP: f32 = 1.0;

/// Pixels of touchpad scrolling that count as one line.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Debug, Default)]
pub struct InputState {
    pub cursor_pos: Option<PhysicalPosition<f64>>,
    /// Scroll gathered since the last zoom step, in lines.
    pub scroll_accum: f32,
}

/// Translates a window event into a simulation command, tracking the cursor
/// along the way.
pub fn command_for(input: &mut InputState, event: &WindowEvent) -> Option<Command> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => handle_keyboard(event),
        WindowEvent::MouseInput { state, button, .. } => handle_mouse_input(input, *button, *state),
        WindowEvent::CursorMoved { position, .. } => {
            handle_cursor_move(input, *position);
            None
        }
        WindowEvent::CursorLeft { .. } => {
            handle_cursor_left(input);
            None
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let scroll_amount = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
            };
            handle_zoom(input, scroll_amount)
        }
        _ => None,
    }
}

pub fn handle_keyboard(event: &KeyEvent) -> Option<Command> {
    if event.state != ElementState::Pressed {
        return None;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        Key::Named(NamedKey::Space) => Some(Command::ToggleSimulation),
        Key::Named(NamedKey::ArrowUp) => Some(Command::SpeedUp),
        Key::Named(NamedKey::ArrowDown) => Some(Command::SpeedDown),
        Key::Character(c) => key_command(c.as_str()),
        _ => None,
    }
}

fn key_command(key: &str) -> Option<Command> {
    match key {
        "q" | "Q" => Some(Command::Quit),
        "n" | "N" => Some(Command::StepOnce),
        "c" | "C" => Some(Command::ClearAll),
        "a" | "A" => Some(Command::TriggerPerturbationSoon),
        "+" | "=" => Some(Command::ZoomIn),
        "-" | "_" => Some(Command::ZoomOut),
        _ => None,
    }
}

/// Adds `delta` lines of scroll and emits at most one zoom step once the
/// total reaches a full line in either direction. Reversing direction drops
/// whatever was gathered the other way.
pub fn handle_zoom(input: &mut InputState, delta: f32) -> Option<Command> {
    if delta == 0.0 || !delta.is_finite() {
        return None;
    }
    if input.scroll_accum * delta < 0.0 {
        input.scroll_accum = 0.0;
    }
    input.scroll_accum += delta;

    if input.scroll_accum >= ZOOM_SCROLL_STEP {
        input.scroll_accum = 0.0;
        Some(Command::ZoomIn)
    } else if input.scroll_accum <= -ZOOM_SCROLL_STEP {
        input.scroll_accum = 0.0;
        Some(Command::ZoomOut)
    } else {
        None
    }
}

pub fn handle_mouse_input(
    input: &InputState,
    button: MouseButton,
    element_state: ElementState,
) -> Option<Command> {
    if button != MouseButton::Left || element_state != ElementState::Pressed {
        return None;
    }
    // Negative positions (cursor just outside the window) saturate to 0.
    input.cursor_pos.map(|pos| Command::PaintCell {
        x: pos.x as u32,
        y: pos.y as u32,
    })
}

pub fn handle_cursor_move(input: &mut InputState, position: PhysicalPosition<f64>) {
    input.cursor_pos = Some(position);
}

pub fn handle_cursor_left(input: &mut InputState) {
    input.cursor_pos = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_to_commands() {
        assert_eq!(key_command("q"), Some(Command::Quit));
        assert_eq!(key_command("N"), Some(Command::StepOnce));
        assert_eq!(key_command("c"), Some(Command::ClearAll));
        assert_eq!(key_command("a"), Some(Command::TriggerPerturbationSoon));
        assert_eq!(key_command("="), Some(Command::ZoomIn));
        assert_eq!(key_command("-"), Some(Command::ZoomOut));
        assert_eq!(key_command("x"), None);
    }

    fn wheel(pixels: f64) -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, pixels)),
            phase: winit::event::TouchPhase::Moved,
        }
    }

    #[test]
    fn wheel_lines_zoom_one_step_each() {
        let mut input = InputState::default();
        assert_eq!(handle_zoom(&mut input, 1.0), Some(Command::ZoomIn));
        assert_eq!(handle_zoom(&mut input, -1.0), Some(Command::ZoomOut));
        assert_eq!(handle_zoom(&mut input, 0.0), None);
        assert_eq!(handle_zoom(&mut input, -0.5), None);
        assert_eq!(handle_zoom(&mut input, -0.5), Some(Command::ZoomOut));
    }

    #[test]
    fn small_pixel_deltas_add_up_to_a_single_zoom() {
        let mut input = InputState::default();
        // 7 deltas of 5px stay under 2 lines of 20px: one step only.
        let commands: Vec<Command> = (0..7)
            .filter_map(|_| command_for(&mut input, &wheel(5.0)))
            .collect();
        assert_eq!(commands, vec![Command::ZoomIn]);
        assert_eq!(input.scroll_accum, 0.75);

        // Turning back discards the leftover instead of cancelling it.
        let commands: Vec<Command> = (0..4)
            .filter_map(|_| command_for(&mut input, &wheel(-5.0)))
            .collect();
        assert_eq!(commands, vec![Command::ZoomOut]);
        assert_eq!(input.scroll_accum, 0.0);
    }

    #[test]
    fn left_click_paints_under_the_cursor() {
        let mut input = InputState::default();
        assert_eq!(
            handle_mouse_input(&input, MouseButton::Left, ElementState::Pressed),
            None
        );

        handle_cursor_move(&mut input, PhysicalPosition::new(13.7, 40.2));
        assert_eq!(
            handle_mouse_input(&input, MouseButton::Left, ElementState::Pressed),
            Some(Command::PaintCell { x: 13, y: 40 })
        );
        assert_eq!(
            handle_mouse_input(&input, MouseButton::Right, ElementState::Pressed),
            None
        );
        assert_eq!(
            handle_mouse_input(&input, MouseButton::Left, ElementState::Released),
            None
        );

        handle_cursor_left(&mut input);
        assert!(input.cursor_pos.is_none());
    }
}
