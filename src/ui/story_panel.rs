use eframe::egui;

use super::app::ViewState;

pub fn draw_story_panel(ctx: &egui::Context, view: &ViewState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                if view.story.is_empty() {
                    ui.label(egui::RichText::new("The mists are parting…").italics());
                } else {
                    ui.label(egui::RichText::new(&view.story).size(15.0));
                }
            });
    });
}
