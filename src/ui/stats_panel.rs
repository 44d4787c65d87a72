use eframe::egui;

use crate::model::player_state::MAX_STEPS;

use super::app::ViewState;

const HEALTH_COLOR: egui::Color32 = egui::Color32::from_rgb(67, 181, 129);
const GOLD_COLOR: egui::Color32 = egui::Color32::from_rgb(241, 196, 15);

pub fn draw_stats_panel(ctx: &egui::Context, view: &ViewState) {
    egui::SidePanel::right("stats")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Adventurer");
            ui.separator();

            ui.label(
                egui::RichText::new(format!("❤ Health: {}", view.state.health))
                    .color(HEALTH_COLOR)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(format!("💰 Gold: {}", view.state.gold))
                    .color(GOLD_COLOR)
                    .strong(),
            );
            ui.label(format!("Step: {}/{MAX_STEPS}", view.state.step));

            ui.separator();
            ui.label(egui::RichText::new("Inventory").strong());

            egui::ScrollArea::vertical().show(ui, |ui| {
                if view.state.inventory.is_empty() {
                    ui.label("None");
                } else {
                    for item in &view.state.inventory {
                        ui.label(format!("• {item}"));
                    }
                }
            });
        });
}
