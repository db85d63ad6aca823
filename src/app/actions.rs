use shapepad::settings;
use std::path::Path;

use super::ShapeApp;

impl ShapeApp {
    pub(super) fn save_to_path(&mut self) {
        match self.canvas.save_to_path(&self.file_path) {
            Ok(()) => self.status = Some(format!("Saved {}", self.file_path)),
            Err(e) => {
                log::warn!("quick save to {} failed: {e}", self.file_path);
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    pub(super) fn save_json_dialog(&mut self) {
        let default_name = Path::new(&self.file_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("drawing.json")
            .to_string();
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let path_str = path.display().to_string();
        match self.canvas.save_to_path(&path) {
            Ok(()) => {
                self.file_path = path_str.clone();
                self.persist_settings();
                self.status = Some(format!("Saved {path_str}"));
            }
            Err(e) => self.status = Some(format!("Save failed: {e}")),
        }
    }

    pub(super) fn open_json_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        let path_str = path.display().to_string();
        match self.canvas.load_from_path(&path) {
            Ok(count) => {
                self.file_path = path_str.clone();
                self.persist_settings();
                self.status = Some(format!("Loaded {count} shapes from {path_str}"));
            }
            Err(e) if e.is_malformed_data() => {
                self.status = Some(format!("Parse failed: {e}"));
            }
            Err(e) => self.status = Some(format!("Read failed: {e}")),
        }
    }

    pub(super) fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.status = Some("Cleared".to_string());
    }

    fn settings_snapshot(&self) -> settings::AppSettings {
        settings::AppSettings {
            file_path: self.file_path.clone(),
            default_fill: self.fill.to_hex(),
            ..self.settings.clone()
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        match settings::save_settings(&self.settings_path, &snapshot) {
            Ok(()) => self.settings = snapshot,
            Err(e) => self.status = Some(format!("Settings save failed: {e}")),
        }
    }
}
