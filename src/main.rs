use eframe::egui;

mod app;

fn main() -> eframe::Result<()> {
    let (settings_path, settings) = shapepad::settings::load_or_default();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
    log::info!("settings from {}", settings_path.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.canvas_width, settings.canvas_height + 60.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shapepad",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app::ShapeApp::new(settings_path, settings)))),
    )
}
