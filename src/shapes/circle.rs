use super::{CIRCLE_RESIZE_STEP, Movable, Previewable, Representable, Resizable, ShapeBase, ShapeKind};
use crate::codec::ShapeRepr;
use crate::error::{Error, Result};
use crate::geometry::{Point, distance};
use crate::model::Rgba;

/// A circle centered on `base.origin`. Rotation has no visible effect, so
/// circles do not implement `Rotatable`.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point, fill: Rgba) -> Self {
        Self {
            base: ShapeBase::new(center, fill),
            radius: 0.0,
        }
    }

    pub fn center(&self) -> Point {
        self.base.origin
    }

    /// Radius as drawn, scale included.
    pub fn drawn_radius(&self) -> f32 {
        self.radius * self.base.scale
    }

    pub fn contains(&self, p: Point) -> bool {
        distance(self.center(), p) <= self.drawn_radius()
    }
}

impl Movable for Circle {
    fn move_to(&mut self, target: Point) {
        self.base.origin = target;
    }
}

impl Resizable for Circle {
    fn resize(&mut self, delta: f32) {
        self.radius = (self.radius + delta * CIRCLE_RESIZE_STEP).max(0.0);
    }
}

impl Previewable for Circle {
    fn preview(&mut self, target: Point) {
        self.radius = distance(self.center(), target);
    }
}

impl Representable for Circle {
    fn to_repr(&self) -> ShapeRepr {
        self.base.repr(ShapeKind::Circle, vec![self.radius])
    }

    fn from_repr(repr: &ShapeRepr) -> Result<Self> {
        let base = ShapeBase::from_repr(repr)?;
        let &[radius] = repr.args.as_slice() else {
            return Err(Error::malformed(format!(
                "circle expects 1 argument, got {}",
                repr.args.len()
            )));
        };
        if radius < 0.0 {
            return Err(Error::malformed(format!("negative circle radius {radius}")));
        }
        Ok(Self { base, radius })
    }
}
