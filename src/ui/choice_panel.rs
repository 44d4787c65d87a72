use eframe::egui;

use crate::engine::protocol::EngineCommand;

use super::app::AdventureApp;

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);

/// Bottom bar: choice buttons, the retry prompt for recoverable failures,
/// and "Play Again" once the adventure is over. Everything is disabled
/// while a turn is generating.
pub fn draw_choice_panel(ctx: &egui::Context, app: &mut AdventureApp) {
    let mut command: Option<EngineCommand> = None;

    egui::TopBottomPanel::bottom("choices").show(ctx, |ui| {
        ui.add_space(6.0);

        if let Some(banner) = &app.view.error {
            ui.colored_label(ERROR_COLOR, &banner.message);
            if banner.retryable && ui.button("Try again").clicked() {
                command = Some(EngineCommand::RetryTurn);
            }
            ui.add_space(6.0);
        }

        if app.view.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(&app.view.loading_message);
            });
        } else if app.view.outcome.is_some() {
            if ui
                .add_sized([ui.available_width(), 36.0], egui::Button::new("Play Again"))
                .clicked()
            {
                command = Some(EngineCommand::StartGame);
            }
        } else {
            let enabled = app.view.error.is_none();
            ui.add_enabled_ui(enabled, |ui| {
                for (index, label) in app.view.choices.iter().enumerate() {
                    let button = egui::Button::new(format!("{}. {label}", index + 1));
                    if ui
                        .add_sized([ui.available_width(), 36.0], button)
                        .clicked()
                    {
                        command = Some(EngineCommand::Choose(index));
                    }
                    ui.add_space(3.0);
                }
            });
        }

        ui.add_space(6.0);
    });

    if let Some(cmd) = command {
        app.send(cmd);
    }
}
