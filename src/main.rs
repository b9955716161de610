use clap::Parser;
use eframe::egui;
use gdos_dashboard::app::DashboardApp;
use gdos_dashboard::config::Config;
use gdos_dashboard::state::{AppState, Command};

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();

    // Load before the window opens; a failed load is shown in the window.
    let mut state = AppState::default();
    state.dispatch(Command::Open(config.data_file.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.as_str())
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(title, state)))),
    )
}
