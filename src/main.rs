#![warn(clippy::all, rust_2018_idioms)]

use doodle_canvas::{CanvasConfig, DoodleApp};

/// Optional path to a JSON canvas configuration
const CONFIG_ENV: &str = "DOODLE_CANVAS_CONFIG";

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = std::env::var_os(CONFIG_ENV).and_then(|path| match CanvasConfig::load(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Ignoring {}: {}", CONFIG_ENV, err);
            None
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Doodle Canvas",
        native_options,
        Box::new(move |cc| Ok(Box::new(DoodleApp::new(cc, config)))),
    )
}
