//! Shape variants and the capabilities they share.
//!
//! Every shape is a [`Shape`] value; behaviour common to all variants is
//! expressed as capability traits implemented per variant and forwarded by
//! `Shape` through a `match`. Circles are the only shape that cannot be rotated.

use crate::codec::ShapeRepr;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::model::Rgba;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};
use std::fmt;

mod circle;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use polygon::{Polygon, PolygonStep};
pub use rectangle::Rectangle;

/// Scale multiplier applied per positive scroll step.
pub const GROW_FACTOR: f32 = 1.05;
/// Scale multiplier applied per negative scroll step.
pub const SHRINK_FACTOR: f32 = 0.95;
/// Scaling down never goes below this, so shapes stay hit-testable.
pub const MIN_SCALE: f32 = 0.01;
/// Radius change per unit of scroll delta for circles.
pub const CIRCLE_RESIZE_STEP: f32 = 0.1;
/// A polygon closes when a click lands this close to its first vertex.
pub const CLOSE_DISTANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Movable {
    /// Puts the shape's anchor point at `target`.
    fn move_to(&mut self, target: Point);
}

pub trait Resizable {
    fn resize(&mut self, delta: f32);
}

pub trait Rotatable {
    /// Turns the shape so that its "up" points from the pivot at `target`.
    fn rotate_towards(&mut self, target: Point);
    fn rotation_pivot(&self) -> Point;
}

pub trait Previewable {
    /// Reshapes the shape while it is being drawn, `target` being the cursor.
    fn preview(&mut self, target: Point);
}

pub trait Representable: Sized {
    fn to_repr(&self) -> ShapeRepr;
    fn from_repr(repr: &ShapeRepr) -> Result<Self>;
}

/// Attributes every variant carries.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeBase {
    pub fill: Rgba,
    pub origin: Point,
    /// Degrees, clockwise on screen.
    pub angle: f32,
    pub scale: f32,
}

impl ShapeBase {
    pub fn new(origin: Point, fill: Rgba) -> Self {
        Self {
            fill,
            origin,
            angle: 0.0,
            scale: 1.0,
        }
    }

    pub(crate) fn repr(&self, kind: ShapeKind, args: Vec<f32>) -> ShapeRepr {
        ShapeRepr {
            kind,
            color: self.fill.to_hex(),
            x: self.origin.x,
            y: self.origin.y,
            angle: self.angle,
            scale: self.scale,
            args,
        }
    }

    pub(crate) fn from_repr(repr: &ShapeRepr) -> Result<Self> {
        let fill = Rgba::from_hex(&repr.color)
            .ok_or_else(|| Error::malformed(format!("bad color '{}'", repr.color)))?;
        let numbers = [repr.x, repr.y, repr.angle, repr.scale];
        if numbers.iter().chain(repr.args.iter()).any(|v| !v.is_finite()) {
            return Err(Error::malformed(format!("non-finite value in {} record", repr.kind)));
        }
        if repr.scale <= 0.0 {
            return Err(Error::malformed(format!("scale must be positive, got {}", repr.scale)));
        }
        Ok(Self {
            fill,
            origin: Point::new(repr.x, repr.y),
            angle: repr.angle,
            scale: repr.scale,
        })
    }

    fn step_scale(&mut self, delta: f32) {
        if delta > 0.0 {
            self.scale *= GROW_FACTOR;
        } else if delta < 0.0 {
            self.scale = (self.scale * SHRINK_FACTOR).max(MIN_SCALE);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn base(&self) -> &ShapeBase {
        match self {
            Shape::Circle(c) => &c.base,
            Shape::Rectangle(r) => &r.base,
            Shape::Polygon(p) => &p.base,
        }
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        match self {
            Shape::Circle(c) => &mut c.base,
            Shape::Rectangle(r) => &mut r.base,
            Shape::Polygon(p) => &mut p.base,
        }
    }

    pub fn fill(&self) -> Rgba {
        self.base().fill
    }

    pub fn set_fill(&mut self, fill: Rgba) {
        self.base_mut().fill = fill;
    }

    pub fn angle(&self) -> f32 {
        self.base().angle
    }

    pub fn scale(&self) -> f32 {
        self.base().scale
    }

    /// Hit test in canvas coordinates.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Circle(c) => c.contains(p),
            Shape::Rectangle(r) => r.contains(p),
            Shape::Polygon(poly) => poly.contains(p),
        }
    }

    pub fn is_rotatable(&self) -> bool {
        self.as_rotatable().is_some()
    }

    pub fn as_rotatable(&self) -> Option<&dyn Rotatable> {
        match self {
            Shape::Circle(_) => None,
            Shape::Rectangle(r) => Some(r),
            Shape::Polygon(p) => Some(p),
        }
    }

    pub fn as_rotatable_mut(&mut self) -> Option<&mut dyn Rotatable> {
        match self {
            Shape::Circle(_) => None,
            Shape::Rectangle(r) => Some(r),
            Shape::Polygon(p) => Some(p),
        }
    }
}

impl Movable for Shape {
    fn move_to(&mut self, target: Point) {
        match self {
            Shape::Circle(c) => c.move_to(target),
            Shape::Rectangle(r) => r.move_to(target),
            Shape::Polygon(p) => p.move_to(target),
        }
    }
}

impl Resizable for Shape {
    fn resize(&mut self, delta: f32) {
        match self {
            Shape::Circle(c) => c.resize(delta),
            Shape::Rectangle(r) => r.resize(delta),
            Shape::Polygon(p) => p.resize(delta),
        }
    }
}

impl Previewable for Shape {
    fn preview(&mut self, target: Point) {
        match self {
            Shape::Circle(c) => c.preview(target),
            Shape::Rectangle(r) => r.preview(target),
            Shape::Polygon(p) => p.preview(target),
        }
    }
}

impl Representable for Shape {
    fn to_repr(&self) -> ShapeRepr {
        match self {
            Shape::Circle(c) => c.to_repr(),
            Shape::Rectangle(r) => r.to_repr(),
            Shape::Polygon(p) => p.to_repr(),
        }
    }

    fn from_repr(repr: &ShapeRepr) -> Result<Self> {
        match repr.kind {
            ShapeKind::Circle => Circle::from_repr(repr).map(Shape::Circle),
            ShapeKind::Rectangle => Rectangle::from_repr(repr).map(Shape::Rectangle),
            ShapeKind::Polygon => Polygon::from_repr(repr).map(Shape::Polygon),
        }
    }
}

/// Builds a fresh, degenerate shape for `tool` at `origin`. Subsequent
/// [`Previewable::preview`] calls grow it.
pub fn create_shape(tool: Tool, origin: Point, fill: Rgba) -> Result<Shape> {
    match tool.shape_kind() {
        Some(ShapeKind::Circle) => Ok(Shape::Circle(Circle::new(origin, fill))),
        Some(ShapeKind::Rectangle) => Ok(Shape::Rectangle(Rectangle::new(origin, fill))),
        Some(ShapeKind::Polygon) => Ok(Shape::Polygon(Polygon::new(origin, fill))),
        None => Err(Error::UnsupportedShapeKind(tool)),
    }
}
