mod app;
mod color;
mod state;
mod ui;

use app::HiringDashboardApp;
use eframe::egui;
use hiring_dashboard::settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::from_args(std::env::args());
    log::info!("starting with source {}", settings.source_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard Contratações Corporativo",
        options,
        Box::new(move |_cc| Ok(Box::new(HiringDashboardApp::new(&settings)))),
    )
}
