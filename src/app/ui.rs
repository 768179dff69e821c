//! Navigation shell: top bar, session area, theme toggle and menus.

use std::sync::{Arc, Mutex};

use egui::{Context, RichText};

use super::state::{App, Route};
use super::views;
use crate::api::{ApiClient, FetchError};

/// Draw the whole frame: shell panels plus the active route's view.
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    // The identity check runs once per application start, never re-polled.
    if !app.session_checked {
        app.session_checked = true;
        start_identity_check(app.client.clone(), ctx, Arc::clone(&app_arc));
    }

    draw_navbar(app, ctx, Arc::clone(&app_arc));

    if app.menus.sidebar_open {
        draw_sidebar(app, ctx);
    }

    egui::CentralPanel::default().show(ctx, |ui| match app.route.clone() {
        Route::Home => views::home::draw(app, ui, ctx),
        Route::Features => views::features::draw(ui),
        Route::Dashboard => views::dashboard::draw(app, ui, ctx, Arc::clone(&app_arc)),
        Route::RepoDetail(_) => views::detail::draw(app, ui, ctx, Arc::clone(&app_arc)),
    });
}

fn draw_navbar(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let narrow = ui.available_width() < 700.0;

            if narrow && ui.button("☰").clicked() {
                app.menus.toggle_sidebar();
            }

            let brand = egui::Button::new(RichText::new("RepoHealth").size(18.0).strong())
                .frame(false);
            if ui.add(brand).clicked() {
                app.navigate(Route::Home);
            }

            if !narrow {
                nav_link(ui, app, "Features", Route::Features);
                nav_link(ui, app, "Dashboard", Route::Dashboard);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dark = ui.visuals().dark_mode;
                let icon = if dark { "☀" } else { "🌙" };
                if ui
                    .button(icon)
                    .on_hover_text("Toggle theme")
                    .clicked()
                {
                    // Manual toggle overrides the ambient preference until
                    // the next start.
                    let next = if dark {
                        egui::Theme::Light
                    } else {
                        egui::Theme::Dark
                    };
                    ctx.set_theme(next);
                }

                match app.session.user().cloned() {
                    None => {
                        if ui.button("Get Started").clicked() {
                            ctx.open_url(egui::OpenUrl::new_tab(app.client.login_url()));
                        }
                    }
                    Some(profile) => {
                        let label = format!("{} ⏷", profile.login);
                        let response = ui.button(label);
                        if response.clicked() {
                            app.menus.toggle_user();
                        }
                        if app.menus.user_open {
                            let clicked_outside =
                                menu_popup(ctx, "user_menu", &response, |ui| {
                                    if ui.button("View Profile").clicked() {
                                        ctx.open_url(egui::OpenUrl::new_tab(
                                            profile.html_url.clone(),
                                        ));
                                        app.menus.close_all();
                                    }
                                    if ui.button("Logout").clicked() {
                                        app.menus.close_all();
                                        start_logout(
                                            app.client.clone(),
                                            ctx,
                                            Arc::clone(&app_arc),
                                        );
                                    }
                                });
                            if clicked_outside {
                                app.menus.user_open = false;
                            }
                        }
                    }
                }
            });
        });
        ui.add_space(4.0);
    });
}

fn draw_sidebar(app: &mut App, ctx: &Context) {
    egui::SidePanel::left("nav_sidebar")
        .resizable(false)
        .default_width(160.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            nav_link(ui, app, "Home", Route::Home);
            nav_link(ui, app, "Features", Route::Features);
            nav_link(ui, app, "Dashboard", Route::Dashboard);
        });
}

fn nav_link(ui: &mut egui::Ui, app: &mut App, label: &str, route: Route) {
    let selected = app.route == route;
    if ui.selectable_label(selected, label).clicked() {
        app.navigate(route);
    }
}

/// Anchored dropdown panel below `anchor`.
///
/// Returns true when a press landed outside both the anchor and the panel,
/// which is the caller's cue to close the menu.
pub(crate) fn menu_popup(
    ctx: &Context,
    id: &str,
    anchor: &egui::Response,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    let area = egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.rect.left_bottom() + egui::vec2(0.0, 4.0))
        .show(ctx, |ui| {
            egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                ui.set_min_width(anchor.rect.width().max(160.0));
                add_contents(ui);
            });
        });

    ctx.input(|input| input.pointer.any_pressed())
        && !anchor.contains_pointer()
        && !area.response.contains_pointer()
}

fn start_identity_check(client: ApiClient, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let result = client.current_user().await.map_err(FetchError::from);
        if let Ok(mut app) = app_arc.lock() {
            app.apply_identity(result);
        }
        ctx.request_repaint();
    });
}

/// Issue the logout request, then reset the visit no matter how it went.
fn start_logout(client: ApiClient, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        client.logout().await;
        if let Ok(mut app) = app_arc.lock() {
            app.reset_after_logout();
        }
        ctx.request_repaint();
    });
}
