use fading_life::{Command, Controller};

/// Draws the menu button and, when open, the side panel. Button clicks come
/// back as commands so they go through the same path as keyboard input.
pub fn show(ctx: &egui::Context, menu_open: &mut bool, controller: &Controller) -> Vec<Command> {
    let mut commands = Vec::new();

    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(ctx, |ui| {
            if ui.button("☰").clicked() {
                *menu_open = !*menu_open;
            }
        });

    if !*menu_open {
        return commands;
    }

    let panel_frame = egui::Frame {
        fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 100),
        ..egui::Frame::side_top_panel(&ctx.style())
    };

    let simulation = controller.simulation();
    let grid = simulation.grid();

    egui::SidePanel::left("side_panel")
        .frame(panel_frame)
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Fading Life");
            ui.separator();
            ui.label(format!("Generation: {}", simulation.generation()));
            ui.label(format!("Live Cells: {}", grid.population()));
            ui.label(format!("Grid: {}x{}", grid.width(), grid.height()));
            ui.label(format!("Cell Size: {}px", simulation.cell_size()));
            ui.label(format!("Speed: {} steps/s", controller.speed()));
            if let Some(aliens) = controller.last_report().and_then(|r| r.perturbed) {
                ui.label(format!("Aliens dropped: {}", aliens));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let label = if controller.is_running() { "Pause" } else { "Run" };
                if ui.button(label).clicked() {
                    commands.push(Command::ToggleSimulation);
                }
                if ui.button("Step").clicked() {
                    commands.push(Command::StepOnce);
                }
                if ui.button("Clear").clicked() {
                    commands.push(Command::ClearAll);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Slower").clicked() {
                    commands.push(Command::SpeedDown);
                }
                if ui.button("Faster").clicked() {
                    commands.push(Command::SpeedUp);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Zoom -").clicked() {
                    commands.push(Command::ZoomOut);
                }
                if ui.button("Zoom +").clicked() {
                    commands.push(Command::ZoomIn);
                }
            });
            if ui.button("Aliens!").clicked() {
                commands.push(Command::TriggerPerturbationSoon);
            }
            ui.separator();
            ui.small("Space run/pause, N step, C clear, A aliens, Up/Down speed, +/- zoom, Q quit");
        });

    commands
}
