#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    use std::path::PathBuf;

    use siluet::state::FileStore;
    use siluet::{Config, Session, SiluetApp};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("siluet=info")).init();

    let config = Config::from_env().unwrap_or_else(|err| {
        log::error!("{}, using default configuration", err);
        Config::default()
    });
    let data_dir = config
        .data_dir
        .clone()
        .or_else(|| eframe::storage_dir("siluet"))
        .unwrap_or_else(|| PathBuf::from("siluet-data"));
    let storage = FileStore::new(data_dir);
    log::info!("Storing data in {}", storage.state_dir().display());

    let session = Session::new(config, Box::new(storage));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 640.0])
            .with_title("Siluet"),
        ..Default::default()
    };
    eframe::run_native(
        "siluet",
        native_options,
        Box::new(|cc| Ok(Box::new(SiluetApp::new(cc, session)))),
    )
}
