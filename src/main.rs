#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the Dockshift window.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use dockshift::config;
use dockshift::egui_app::DockApp;
use dockshift::logging;
use eframe::egui;

const INITIAL_SIZE: [f32; 2] = [480.0, 200.0];
const MIN_VIEWPORT_SIZE: [f32; 2] = [320.0, 160.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match config::load_or_default() {
        Ok(config) => (config, None),
        Err(err) => (config::DockConfig::default(), Some(err)),
    };

    if let Err(err) = logging::init(&config.logging.level) {
        eprintln!("Logging disabled: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!("Falling back to default config: {err}");
    }

    let app = DockApp::new(&config)?;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(INITIAL_SIZE)
            .with_min_inner_size(MIN_VIEWPORT_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Dockshift",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
