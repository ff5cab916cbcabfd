use hwviz::application::InfoStore;
use hwviz::config::Config;
use hwviz::infrastructure::logging;
use hwviz::interfaces::VisualizerApp;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Logging (stdout + UI log panel)
    let log_rx = logging::init_with_ui_channel();

    info!("Hardware Topology Visualizer {} starting", env!("CARGO_PKG_VERSION"));

    // 2. Configuration
    let config = Config::from_env()?;

    // 3. Performance catalog, loaded once for the lifetime of the window
    let store = InfoStore::load(&config.perf_data_source());

    let app = VisualizerApp::new(store, log_rx, &config.ui);

    // 4. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_title("Hardware Topology Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "Hardware Topology Visualizer",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
