//! Repository collection view: fetch, filter, sort and render.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use egui::{Color32, Context, RichText};

use crate::api::FetchError;
use crate::app::state::{App, Loadable};
use crate::app::ui::menu_popup;
use crate::types::{Repository, SortKey};
use crate::utils::{collection_stats, derive_view, format_relative, language_options};

pub fn draw(app: &mut App, ui: &mut egui::Ui, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    if app.repos.is_idle() {
        start_repos_fetch(app, ctx, Arc::clone(&app_arc));
    }

    match &app.repos {
        Loadable::Idle | Loadable::Loading => {
            draw_loading(ui);
            return;
        }
        Loadable::Failed(err) => {
            let message = err.message.clone();
            draw_error(app, ui, ctx, app_arc, &message);
            return;
        }
        Loadable::Ready(_) => {}
    }
    let repos: Vec<Repository> = app.repos.ready().cloned().unwrap_or_default();

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.heading("GitHub Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create Repository").clicked() {
                ctx.open_url(egui::OpenUrl::new_tab("https://github.com/new"));
            }
        });
    });
    ui.label(
        RichText::new(format!("Managing {} repositories", repos.len())).weak(),
    );
    ui.add_space(8.0);

    draw_filter_bar(app, ui, ctx, &repos);

    if !repos.is_empty() {
        ui.add_space(12.0);
        draw_stat_tiles(app, ui, &repos);
    }

    ui.add_space(12.0);
    ui.separator();

    let view = derive_view(&repos, &app.filter);
    if view.is_empty() {
        draw_empty_state(app, ui, ctx, repos.is_empty());
        return;
    }

    let now = Utc::now();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for repo in &view {
            draw_repo_card(app, ui, ctx, &app_arc, repo, now);
            ui.add_space(8.0);
        }
    });
}

fn draw_filter_bar(app: &mut App, ui: &mut egui::Ui, ctx: &Context, repos: &[Repository]) {
    let languages = language_options(repos);

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut app.filter.search)
                .hint_text("Search repositories by name, description...")
                .desired_width(280.0),
        );

        let sort_response = ui.button(format!("Sort: {} ⏷", app.filter.sort.label()));
        if sort_response.clicked() {
            app.menus.toggle_sort();
        }
        if app.menus.sort_open {
            let clicked_outside = menu_popup(ctx, "sort_menu", &sort_response, |ui| {
                for key in SortKey::ALL {
                    if ui
                        .selectable_label(app.filter.sort == key, key.label())
                        .clicked()
                    {
                        app.filter.sort = key;
                        app.menus.close_all();
                    }
                }
            });
            if clicked_outside {
                app.menus.sort_open = false;
            }
        }

        let language_label = app
            .filter
            .language
            .clone()
            .unwrap_or_else(|| "All Languages".to_string());
        let language_response = ui.button(format!("{language_label} ⏷"));
        if language_response.clicked() {
            app.menus.toggle_language();
        }
        if app.menus.language_open {
            let clicked_outside = menu_popup(ctx, "language_menu", &language_response, |ui| {
                if ui
                    .selectable_label(app.filter.language.is_none(), "All Languages")
                    .clicked()
                {
                    app.filter.language = None;
                    app.menus.close_all();
                }
                for language in &languages {
                    let selected = app.filter.language.as_deref() == Some(language.as_str());
                    if ui.selectable_label(selected, language).clicked() {
                        app.filter.language = Some(language.clone());
                        app.menus.close_all();
                    }
                }
            });
            if clicked_outside {
                app.menus.language_open = false;
            }
        }
    });
}

fn draw_stat_tiles(app: &App, ui: &mut egui::Ui, repos: &[Repository]) {
    let stats = collection_stats(repos);
    let favorites = app.favorites.len();

    ui.columns(4, |columns| {
        stat_tile(&mut columns[0], "Total Repositories", stats.total as u64);
        stat_tile(&mut columns[1], "Total Stars", stats.stars);
        stat_tile(&mut columns[2], "Total Forks", stats.forks);
        stat_tile(&mut columns[3], "Favorites", favorites as u64);
    });
}

fn stat_tile(ui: &mut egui::Ui, title: &str, value: u64) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new(title).small().weak());
        ui.label(RichText::new(value.to_string()).size(22.0).strong());
    });
}

fn draw_repo_card(
    app: &mut App,
    ui: &mut egui::Ui,
    ctx: &Context,
    app_arc: &Arc<Mutex<App>>,
    repo: &Repository,
    now: chrono::DateTime<Utc>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&repo.name).size(17.0).strong());
            if repo.private {
                ui.label(
                    RichText::new("Private")
                        .small()
                        .color(Color32::from_rgb(202, 138, 4)),
                );
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let favorite = app.favorites.contains(&repo.id);
                let star = if favorite { "★" } else { "☆" };
                if ui
                    .button(star)
                    .on_hover_text("Toggle favorite")
                    .clicked()
                {
                    app.toggle_favorite(repo.id);
                }
            });
        });

        let description = repo
            .description
            .as_deref()
            .unwrap_or("No description available for this repository");
        ui.label(RichText::new(description).weak());

        ui.horizontal(|ui| {
            if let Some(language) = &repo.language {
                ui.label(RichText::new("●").color(language_color(language)));
                ui.label(language);
                ui.separator();
            }
            ui.label(format!("⭐ {}", repo.stargazers_count));
            ui.label(format!("{} forks", repo.forks_count));
            if let Some(updated) = repo.updated_at {
                ui.separator();
                ui.label(
                    RichText::new(format!("Updated {}", format_relative(updated, now))).weak(),
                );
            }
        });

        ui.horizontal(|ui| {
            if ui.button("GitHub ↗").clicked() {
                ctx.open_url(egui::OpenUrl::new_tab(repo.html_url.clone()));
            }
            if ui.button("Explore").clicked() {
                super::detail::start_detail_fetch(
                    app,
                    ctx,
                    Arc::clone(app_arc),
                    repo.name.clone(),
                );
            }
        });
    });
}

fn draw_loading(ui: &mut egui::Ui) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
        ui.add_space(8.0);
        ui.label("Loading repositories...");
    });
}

fn draw_error(
    app: &mut App,
    ui: &mut egui::Ui,
    ctx: &Context,
    app_arc: Arc<Mutex<App>>,
    message: &str,
) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new("Connection Error").color(Color32::from_rgb(220, 38, 38)));
        ui.add_space(8.0);
        ui.label(message);
        ui.add_space(12.0);
        if ui.button("Retry").clicked() {
            start_repos_fetch(app, ctx, app_arc);
        }
    });
}

fn draw_empty_state(app: &mut App, ui: &mut egui::Ui, ctx: &Context, collection_empty: bool) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        if collection_empty {
            ui.heading("No Repositories");
            ui.add_space(8.0);
            ui.label("Start your coding journey by creating your first repository.");
            ui.add_space(12.0);
            if ui.button("Create Your First Repository").clicked() {
                ctx.open_url(egui::OpenUrl::new_tab("https://github.com/new"));
            }
        } else {
            ui.heading("No matches found");
            ui.add_space(8.0);
            ui.label("Try adjusting your search criteria or filters.");
            ui.add_space(12.0);
            if ui.button("Reset Filters").clicked() {
                app.filter.reset();
            }
        }
    });
}

/// Issue (or re-issue) the collection fetch for the current generation.
pub(crate) fn start_repos_fetch(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    let generation = app.begin_repos_fetch();
    let client = app.client.clone();
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let result = client.list_repositories().await.map_err(FetchError::from);
        if let Ok(mut app) = app_arc.lock() {
            app.apply_repos_result(generation, result);
        }
        ctx.request_repaint();
    });
}

/// Accent color for a language dot, defaulting to gray for the long tail.
fn language_color(language: &str) -> Color32 {
    match language {
        "JavaScript" => Color32::from_rgb(250, 204, 21),
        "TypeScript" => Color32::from_rgb(59, 130, 246),
        "Python" => Color32::from_rgb(34, 197, 94),
        "Java" => Color32::from_rgb(249, 115, 22),
        "C++" => Color32::from_rgb(236, 72, 153),
        "C#" => Color32::from_rgb(168, 85, 247),
        "Go" => Color32::from_rgb(6, 182, 212),
        "Rust" => Color32::from_rgb(239, 68, 68),
        "PHP" => Color32::from_rgb(99, 102, 241),
        "Ruby" => Color32::from_rgb(220, 38, 38),
        "Swift" => Color32::from_rgb(251, 146, 60),
        "Kotlin" => Color32::from_rgb(147, 51, 234),
        _ => Color32::from_rgb(156, 163, 175),
    }
}
