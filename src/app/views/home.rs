//! Landing page.

use egui::RichText;

use super::features::FEATURES;
use crate::app::state::{App, Route};

pub fn draw(app: &mut App, ui: &mut egui::Ui, ctx: &egui::Context) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Know the pulse of your").size(30.0).strong());
        ui.label(
            RichText::new("repository health")
                .size(30.0)
                .strong()
                .color(egui::Color32::from_rgb(234, 88, 12)),
        );
        ui.add_space(8.0);
        ui.label("Scores, activity and documentation quality for every repository you own, in one place.");
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            // Center the pair of buttons by hand; egui has no hbox centering.
            let spacing = (ui.available_width() - 320.0).max(0.0) / 2.0;
            ui.add_space(spacing);

            if app.session.is_authenticated() {
                if ui.button(RichText::new("Open Dashboard").size(16.0)).clicked() {
                    app.navigate(Route::Dashboard);
                }
            } else if ui.button(RichText::new("Get Started").size(16.0)).clicked() {
                ctx.open_url(egui::OpenUrl::new_tab(app.client.login_url()));
            }

            if ui.button(RichText::new("View Features").size(16.0)).clicked() {
                app.navigate(Route::Features);
            }
        });
    });

    ui.add_space(40.0);
    ui.columns(3, |columns| {
        for (column, (title, description)) in columns.iter_mut().zip(FEATURES.iter().take(3)) {
            egui::Frame::group(column.style()).show(column, |ui| {
                ui.strong(*title);
                ui.add_space(4.0);
                ui.label(*description);
            });
        }
    });
}
