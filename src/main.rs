mod app;
mod ui;

use app::ViewerApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tsviewer::ViewerConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ViewerConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring configuration: {e}");
        ViewerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Time Series Viewer")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Time Series Viewer",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc, config)))),
    )
}
