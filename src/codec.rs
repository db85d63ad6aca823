//! Drawing file format.
//!
//! A drawing is stored as pretty-printed JSON:
//!
//! ```json
//! { "version": 1, "shapes": [ { "kind": "circle", "color": "#FF0000",
//!   "x": 5.0, "y": 5.0, "angle": 0.0, "scale": 1.0, "args": [3.0] } ] }
//! ```
//!
//! `args` depends on `kind`: `[radius]` for circles, `[width, height]` for
//! rectangles, `[pivot_dx, pivot_dy, v0x, v0y, v1x, v1y, ...]` for polygons.
//! Records are kept in draw order.

use crate::error::{Error, Result};
use crate::shapes::{Representable, Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FORMAT_VERSION: u32 = 1;

/// Flat, serializable form of one shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRepr {
    pub kind: ShapeKind,
    pub color: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub args: Vec<f32>,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Serialize, Deserialize)]
struct DrawingFile {
    version: u32,
    shapes: Vec<ShapeRepr>,
}

pub fn shapes_to_reprs<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Vec<ShapeRepr> {
    shapes.into_iter().map(Representable::to_repr).collect()
}

/// Rebuilds every record or fails as a whole.
pub fn shapes_from_reprs(reprs: &[ShapeRepr]) -> Result<Vec<Shape>> {
    reprs
        .iter()
        .enumerate()
        .map(|(i, repr)| {
            Shape::from_repr(repr).map_err(|e| match e {
                Error::MalformedData { message } => {
                    Error::malformed(format!("shape {i}: {message}"))
                }
                other => other,
            })
        })
        .collect()
}

pub fn save<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Result<Vec<u8>> {
    let file = DrawingFile {
        version: FORMAT_VERSION,
        shapes: shapes_to_reprs(shapes),
    };
    Ok(serde_json::to_vec_pretty(&file)?)
}

pub fn load(bytes: &[u8]) -> Result<Vec<Shape>> {
    let file: DrawingFile = serde_json::from_slice(bytes)?;
    if file.version != FORMAT_VERSION {
        return Err(Error::VersionMismatch {
            expected: FORMAT_VERSION,
            found: file.version,
        });
    }
    shapes_from_reprs(&file.shapes)
}

pub fn save_to_path<'a>(
    path: impl AsRef<Path>,
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> Result<()> {
    let bytes = save(shapes)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::info!("saved drawing to {}", path.as_ref().display());
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Shape>> {
    let bytes = std::fs::read(path.as_ref())?;
    let shapes = load(&bytes)?;
    log::info!("loaded {} shapes from {}", shapes.len(), path.as_ref().display());
    Ok(shapes)
}
