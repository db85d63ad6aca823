use crate::canvas::CanvasConfig;
use crate::error::Result;
use crate::model::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "shapepad.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Target of "Quick save" and the last opened drawing.
    pub file_path: String,
    pub default_fill: String,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub handle_offset: f32,
    pub handle_radius: f32,
    /// Default `env_logger` filter; `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            file_path: "drawing.json".to_string(),
            default_fill: Rgba::default().to_hex(),
            canvas_width: 1000.0,
            canvas_height: 700.0,
            handle_offset: canvas.handle_offset,
            handle_radius: canvas.handle_radius,
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    pub fn canvas_config(&self) -> CanvasConfig {
        let defaults = CanvasConfig::default();
        CanvasConfig {
            handle_offset: positive_or(self.handle_offset, defaults.handle_offset),
            handle_radius: positive_or(self.handle_radius, defaults.handle_radius),
        }
    }

    /// Configured fill, falling back to the built-in default on a bad string.
    pub fn fill(&self) -> Rgba {
        Rgba::from_hex(&self.default_fill).unwrap_or_default()
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

/// First existing settings file: `$HOME/.config/shapepad.toml`, then
/// `settings.toml` in the working directory.
pub fn config_path() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join(CONFIG_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    let local = Path::new("settings.toml");
    local.exists().then(|| local.to_path_buf())
}

/// Resolves the settings path and loads it, trying `settings.json` before
/// falling back to defaults.
pub fn load_or_default() -> (PathBuf, AppSettings) {
    let path = config_path().unwrap_or_else(|| PathBuf::from("settings.toml"));
    let settings = load_settings(&path)
        .or_else(|| load_settings(Path::new("settings.json")))
        .unwrap_or_default();
    (path, settings)
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

pub fn load_settings(path: &Path) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if is_toml(path) {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<()> {
    let text = if is_toml(path) {
        toml::to_string_pretty(settings)?
    } else {
        serde_json::to_string_pretty(settings)?
    };
    std::fs::write(path, text)?;
    log::debug!("settings written to {}", path.display());
    Ok(())
}
