//! RepoHealth Dashboard
//!
//! A GUI client for browsing repository health scores and activity.

use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use eframe::egui;
use tokio::runtime::Runtime;

use repohealth::api::ApiClient;
use repohealth::app::{App, AppWrapper};
use repohealth::config::Config;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load();
    log::info!("using service at {}", config.base_url);
    let client = ApiClient::new(&config).context("failed to build HTTP client")?;

    // The UI loop runs inside the Tokio runtime so fetch tasks can be
    // spawned straight from event handlers.
    let rt = Runtime::new().context("failed to start async runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 840.0])
                .with_min_inner_size([900.0, 600.0])
                .with_title("RepoHealth"),
            ..Default::default()
        };

        eframe::run_native(
            "RepoHealth",
            options,
            Box::new(move |cc| {
                // Seed the theme from the ambient preference; it keeps
                // following the system until the user toggles manually.
                cc.egui_ctx.set_theme(egui::ThemePreference::System);

                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(client)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|err| anyhow::anyhow!("failed to run application: {err}"))
    })
}
