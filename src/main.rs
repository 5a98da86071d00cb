mod app;
mod color;
mod state;
mod ui;

use app::EchemViewerApp;
use eframe::egui;
use echem_viewer::settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load_or_default();
    log::debug!("Starting with {settings:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Echem Viewer – Electrochemistry Data",
        options,
        Box::new(|_cc| Ok(Box::new(EchemViewerApp::new(settings)))),
    )
}
