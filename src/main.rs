//! Main application entry point (native).

#![warn(clippy::all, rust_2018_idioms)]

use xenedit::{EngineConfig, XenEditApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    log::info!("Starting xenEDIT");

    let config = EngineConfig::from_env();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("xenEDIT Tool")
            .with_inner_size([config.canvas_width as f32 + 200.0, config.canvas_height as f32 + 40.0]),
        ..Default::default()
    };
    eframe::run_native(
        "xenEDIT Tool",
        native_options,
        Box::new(move |cc| Ok(Box::new(XenEditApp::new(cc, &config)))),
    )
}
