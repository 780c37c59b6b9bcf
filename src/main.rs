mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::BabyNamesApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Baby Names",
        options,
        Box::new(move |cc| Ok(Box::new(BabyNamesApp::new(cc, &config)))),
    )
}
