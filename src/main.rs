mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use app::IncomeEdaApp;
use eframe::egui;
use income_eda::config::DashboardConfig;
use income_eda::dashboard;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::resolve(cli_path).context("resolving configuration")?;

    // Everything is computed up front; the window only displays it.
    let dashboard = dashboard::startup(&config)
        .inspect_err(|e| log::error!("Startup failed: {e}"))
        .with_context(|| format!("building dashboard from {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    let state = AppState::new(dashboard, config.data_path);
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(IncomeEdaApp::new(state)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
