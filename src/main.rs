//! SLIRC spell check demo - a chat compose box with live spell checking
//!
//! Architecture:
//! - Main thread: runs the egui UI and all spell lookups
//! - Optional writer thread: persists the personal dictionary
//! - Settings and checker notifications travel over crossbeam channels

use eframe::egui;
use slirc_spellcheck::app::SpellApp;

fn main() -> eframe::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SLIRC - Spell Check",
        options,
        Box::new(|cc| Ok(Box::new(SpellApp::new(cc)))),
    )
}
