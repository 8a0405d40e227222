mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::MarketboardApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line; otherwise File → Open.
    let mut initial = AppState::default();
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        match data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings ({} dropped) from {}",
                    table.len(),
                    table.dropped_rows,
                    path.display()
                );
                initial.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                initial.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Marketboard – Listings Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(MarketboardApp::new(initial)))),
    )
}
