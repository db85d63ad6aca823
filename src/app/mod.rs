use shapepad::canvas::{Canvas, CanvasChange};
use shapepad::geometry::Point;
use shapepad::model::Rgba;
use shapepad::settings::AppSettings;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

mod actions;
mod render;
mod update;

pub struct ShapeApp {
    canvas: Canvas,
    fill: Rgba,
    file_path: String,
    settings_path: PathBuf,
    settings: AppSettings,
    status: Option<String>,
    /// Last pointer position forwarded to the canvas, in canvas coordinates.
    last_pointer: Option<Point>,
    diagnostics: Rc<RefCell<Vec<String>>>,
}

impl ShapeApp {
    pub fn new(settings_path: PathBuf, settings: AppSettings) -> Self {
        let mut canvas = Canvas::new(settings.canvas_config());
        let diagnostics = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&diagnostics);
        canvas.subscribe(move |change| {
            if let CanvasChange::Diagnostic(message) = change {
                sink.borrow_mut().push(message.clone());
            }
        });

        Self {
            canvas,
            fill: settings.fill(),
            file_path: settings.file_path.clone(),
            settings_path,
            settings,
            status: None,
            last_pointer: None,
            diagnostics,
        }
    }

    /// Moves the newest canvas diagnostic, if any, into the status bar.
    fn drain_diagnostics(&mut self) {
        if let Some(message) = self.diagnostics.borrow_mut().drain(..).last() {
            self.status = Some(message);
        }
    }
}
