//! Repository detail view: health scores and the 30-day commit chart.

use std::sync::{Arc, Mutex};

use egui::{Color32, Context, RichText};

use crate::api::{ErrorKind, FetchError};
use crate::app::state::{App, Loadable, Route};
use crate::plotting;
use crate::types::HealthReport;

pub fn draw(app: &mut App, ui: &mut egui::Ui, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    ui.add_space(8.0);
    if ui.button("← Dashboard").clicked() {
        app.navigate(Route::Dashboard);
        return;
    }

    let dark = ui.visuals().dark_mode;
    ensure_chart(app, ctx, &app_arc, dark);

    let Some(detail) = app.detail.as_ref() else {
        // Route and detail state desynced; fall back to the dashboard.
        app.navigate(Route::Dashboard);
        return;
    };
    let repo_name = detail.repo_name.clone();
    let report = detail.report.clone();
    let texture = detail.plot_texture.clone();
    let rendering = detail.plot_rendering;

    match report {
        Loadable::Idle | Loadable::Loading => {
            ui.add_space(80.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.add_space(8.0);
                ui.label(format!("Loading health report for {repo_name}..."));
            });
        }
        Loadable::Failed(err) => draw_failure(ui, &repo_name, &err),
        Loadable::Ready(report) => {
            draw_report(ui, &report, texture.as_ref(), rendering);
        }
    }
}

/// Kick off a chart render when the report is ready and the current theme
/// has no up-to-date image, then upload finished bytes as a texture.
fn ensure_chart(app: &mut App, ctx: &Context, app_arc: &Arc<Mutex<App>>, dark: bool) {
    let Some(detail) = app.detail.as_mut() else {
        return;
    };

    if detail.needs_plot(dark) {
        detail.plot_rendering = true;
        let generation = detail.generation;
        let name = detail.repo_name.clone();
        let history = detail
            .report
            .ready()
            .map(|report| report.history.clone())
            .unwrap_or_default();
        let arc = Arc::clone(app_arc);
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let png = match plotting::history_chart_png(&name, &history, dark).await {
                Ok(png) => Some(png),
                Err(err) => {
                    log::warn!("chart render for {name} failed: {err}");
                    None
                }
            };
            if let Ok(mut app) = arc.lock() {
                app.apply_detail_plot(generation, dark, png);
            }
            ctx.request_repaint();
        });
        return;
    }

    if detail.plot_texture.is_none() {
        if let Some(png) = detail.plot_png.clone() {
            match load_chart_texture(ctx, &png) {
                Ok(texture) => detail.plot_texture = Some(texture),
                Err(err) => {
                    log::warn!("failed to decode chart image: {err}");
                    detail.plot_png = None;
                }
            }
        }
    }
}

fn draw_report(
    ui: &mut egui::Ui,
    report: &HealthReport,
    texture: Option<&egui::TextureHandle>,
    rendering: bool,
) {
    let health = &report.health;

    ui.add_space(8.0);
    ui.heading(format!("{} - Score: {}", health.repo, health.total_score));
    ui.add_space(8.0);

    egui::Grid::new("health_scores")
        .num_columns(2)
        .spacing([40.0, 6.0])
        .show(ui, |ui| {
            ui.label("Activity Score");
            ui.strong(health.activity_score.to_string());
            ui.end_row();

            ui.label("Issue Score");
            ui.strong(health.issue_score.to_string());
            ui.end_row();

            ui.label("Docs Score");
            ui.strong(health.docs_score.to_string());
            ui.end_row();

            ui.label("Commits (Last 30 Days)");
            ui.strong(health.commit_count_last_30_days.to_string());
            ui.end_row();

            ui.label("Open Issues");
            ui.strong(health.open_issues.to_string());
            ui.end_row();
        });

    ui.add_space(16.0);
    ui.strong("Commit History (Last 30 Days)");
    ui.add_space(8.0);

    if report.history.is_empty() {
        ui.label(RichText::new("No commits recorded in the last 30 days.").weak());
    } else if let Some(texture) = texture {
        ui.image(texture);
    } else if rendering {
        ui.spinner();
    }
}

fn draw_failure(ui: &mut egui::Ui, repo_name: &str, err: &FetchError) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        ui.heading(
            RichText::new("Unable to load health report").color(Color32::from_rgb(220, 38, 38)),
        );
        ui.add_space(8.0);
        ui.label(format!("{repo_name}: {}", err.message));
        if err.kind == ErrorKind::ContentType {
            ui.add_space(8.0);
            ui.label(
                RichText::new("The service did not return JSON. Your session may have expired; sign in again from the navigation bar.")
                    .weak(),
            );
        }
    });
}

fn load_chart_texture(ctx: &Context, png: &[u8]) -> Result<egui::TextureHandle, image::ImageError> {
    let decoded = image::load_from_memory(png)?;
    let size = [decoded.width() as usize, decoded.height() as usize];
    let pixels = decoded.to_rgba8();
    let pixels = pixels.as_flat_samples();
    Ok(ctx.load_texture(
        "health_chart",
        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
        egui::TextureOptions::LINEAR,
    ))
}

/// Navigate to the detail route for `name` and start its report fetch.
pub(crate) fn start_detail_fetch(
    app: &mut App,
    ctx: &Context,
    app_arc: Arc<Mutex<App>>,
    name: String,
) {
    let generation = app.open_repo(name.clone());
    let client = app.client.clone();
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let result = client.repo_health(&name).await.map_err(FetchError::from);
        if let Ok(mut app) = app_arc.lock() {
            app.apply_detail_result(generation, result);
        }
        ctx.request_repaint();
    });
}
