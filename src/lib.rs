//! Interactive 2-D shape canvas.
//!
//! The engine lives in [`canvas`]: feed it [`canvas::PointerEvent`]s and tool
//! switches, read shapes, preview and selection back. Shapes persist through
//! [`codec`]. The desktop front end in the binary is a thin egui shell on top.

pub mod canvas;
pub mod codec;
pub mod error;
pub mod geometry;
pub mod model;
pub mod settings;
pub mod shapes;
pub mod tool;

pub use canvas::{Canvas, CanvasChange, CanvasConfig, CanvasState, PointerEvent};
pub use error::{Error, Result};
pub use geometry::Point;
pub use model::{FillSource, Rgba, ShapeId};
pub use shapes::{Shape, ShapeKind, create_shape};
pub use tool::{Tool, ToolSelector};
