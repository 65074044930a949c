// src/main.rs
use eframe::egui;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod config;
mod file;
mod input;
mod state;
mod ui;
mod utils;

use app::DetectorApp;
use config::Settings;
use state::AppState;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let settings = Settings::load()?;
    let state = AppState::new(settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 860.0])
            .with_min_inner_size([720.0, 600.0])
            .with_title("AI Counterfeit Detector"),
        ..Default::default()
    };

    eframe::run_native(
        "Counterfeit Detector",
        options,
        Box::new(move |cc| Box::new(DetectorApp::new(cc, state))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
