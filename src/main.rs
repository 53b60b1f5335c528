mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::{HappinessApp, Session};
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    let config = DashboardConfig::from_args();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    // The dataset is read once, before the window opens.
    let session = Session::start(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "World Happiness Report Visualisation",
        options,
        Box::new(move |_cc| Ok(Box::new(HappinessApp::new(session)))),
    )
}
