mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use antenna_eff::config::Settings;
use app::AntennaEffApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::load(Settings::default_path());
    // Project from the command line, else the last one opened.
    let project = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| state.settings.last_project.clone());
    if let Some(path) = project {
        if let Err(e) = state.open_project(&path) {
            state.report(e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Antenna Efficiency",
        options,
        Box::new(|_cc| Ok(Box::new(AntennaEffApp::new(state)))),
    )
}
