//! Static features page.

/// Feature copy shown on the features page and sampled on the landing page.
pub(crate) const FEATURES: [(&str, &str); 6] = [
    (
        "Real-time Analytics",
        "Monitor commits, pull requests, and issues with dashboards that update as your repositories change.",
    ),
    (
        "AI Code Review",
        "Get intelligent suggestions for code improvements, complexity reduction, and best practice recommendations.",
    ),
    (
        "Documentation Health",
        "Automatically evaluate README quality, code comments, and documentation completeness with actionable tips.",
    ),
    (
        "Team Collaboration",
        "Track contributor engagement, response times, and community health to build stronger development teams.",
    ),
    (
        "Smart Alerts",
        "Receive notifications about declining metrics, stale pull requests, and optimization opportunities.",
    ),
    (
        "Predictive Insights",
        "Understand trends and anticipate future repository health from historical activity.",
    ),
];

pub fn draw(ui: &mut egui::Ui) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("Everything you need to keep repositories healthy");
        });
        ui.add_space(16.0);

        for row in FEATURES.chunks(2) {
            ui.columns(2, |columns| {
                for (column, (title, description)) in columns.iter_mut().zip(row) {
                    egui::Frame::group(column.style()).show(column, |ui| {
                        ui.strong(*title);
                        ui.add_space(4.0);
                        ui.label(*description);
                    });
                }
            });
            ui.add_space(8.0);
        }
    });
}
