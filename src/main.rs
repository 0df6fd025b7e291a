#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use durood_viewer::ViewerConfig;
use durood_viewer::config::DEFAULT_CONFIG_FILE;

/// Resolve the startup configuration from the command line.
///
/// Usage:
///   durood_viewer [--config <viewer_config.json>] [--assets <dir>]
///
/// `--assets` points images, audio and the mapping file at one folder and
/// wins over whatever the config file says.
fn config_from_args(argv: &[String]) -> ViewerConfig {
    let mut config_path: Option<PathBuf> = None;
    let mut assets_root: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < argv.len() {
        let a = &argv[i];
        if a == "--config" || a == "--assets" {
            match argv.get(i + 1) {
                Some(value) => {
                    let value = PathBuf::from(value);
                    if a == "--config" {
                        config_path = Some(value);
                    } else {
                        assets_root = Some(value);
                    }
                    i += 1;
                }
                None => log::error!("Missing path after {a}"),
            }
        } else {
            log::warn!("Ignoring unknown argument {a}");
        }
        i += 1;
    }

    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = ViewerConfig::load_or_default(&path);
    match assets_root {
        Some(root) => config.with_assets_root(&root),
        None => config,
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let config = config_from_args(&argv);
    log::info!(
        "Starting with images at {}, audio at {}, mapping from {}",
        config.images_path.display(),
        config.audio_path.display(),
        config.mapping_source
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Durood Viewer",
        native_options,
        Box::new(|cc| Ok(Box::new(durood_viewer::ViewerApp::new(cc, config)))),
    )
}
