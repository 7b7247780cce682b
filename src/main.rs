mod app;
mod config;

use std::path::PathBuf;

use config::AppConfig;

/// Demo entry point: load the config, wire up logging, run the window.
fn main() {
    let config = AppConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let image_path = std::env::args().nth(1).map(PathBuf::from);

    if let Err(e) = app::run(config, image_path) {
        eprintln!("Application error: {}", e);
    }
}
