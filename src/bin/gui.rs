use eframe::egui;
use led_cube_editor::{CubeEditorApp, EditorOptions};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Optional JSON options file as the first argument
    let editor_options = match std::env::args().nth(1) {
        Some(path) => EditorOptions::load(Path::new(&path))?,
        None => EditorOptions::default(),
    };
    let app = CubeEditorApp::new(editor_options)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("LED Cube Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "LED Cube Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {}", e))
}
