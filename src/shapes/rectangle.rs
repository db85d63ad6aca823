use super::{Movable, Previewable, Representable, Resizable, Rotatable, ShapeBase, ShapeKind};
use crate::codec::ShapeRepr;
use crate::error::{Error, Result};
use crate::geometry::{Point, angle_from_vertical, to_local, to_world};
use crate::model::Rgba;

/// Axis-aligned box with its top-left corner at `base.origin`, scaled and
/// rotated about its center.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub width: f32,
    pub height: f32,
    /// Corner fixed at creation; preview stretches the box from here.
    pivot: Point,
}

impl Rectangle {
    pub fn new(corner: Point, fill: Rgba) -> Self {
        Self {
            base: ShapeBase::new(corner, fill),
            width: 0.0,
            height: 0.0,
            pivot: corner,
        }
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn center(&self) -> Point {
        self.base.origin.offset(self.width * 0.5, self.height * 0.5)
    }

    /// Corners in canvas coordinates, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let o = self.base.origin;
        let center = self.center();
        [
            o,
            o.offset(self.width, 0.0),
            o.offset(self.width, self.height),
            o.offset(0.0, self.height),
        ]
        .map(|p| to_world(p, center, self.base.scale, self.base.angle))
    }

    pub fn contains(&self, p: Point) -> bool {
        let Some(local) = to_local(p, self.center(), self.base.scale, self.base.angle) else {
            return false;
        };
        let o = self.base.origin;
        local.x >= o.x && local.x <= o.x + self.width && local.y >= o.y && local.y <= o.y + self.height
    }
}

impl Movable for Rectangle {
    fn move_to(&mut self, target: Point) {
        self.base.origin = target.offset(-self.width * 0.5, -self.height * 0.5);
    }
}

impl Resizable for Rectangle {
    fn resize(&mut self, delta: f32) {
        self.base.step_scale(delta);
    }
}

impl Rotatable for Rectangle {
    fn rotate_towards(&mut self, target: Point) {
        let d = target.sub(self.center());
        self.base.angle = angle_from_vertical(d.x, d.y);
    }

    fn rotation_pivot(&self) -> Point {
        self.center()
    }
}

impl Previewable for Rectangle {
    fn preview(&mut self, target: Point) {
        self.base.origin = Point::new(self.pivot.x.min(target.x), self.pivot.y.min(target.y));
        self.width = (target.x - self.pivot.x).abs();
        self.height = (target.y - self.pivot.y).abs();
    }
}

impl Representable for Rectangle {
    fn to_repr(&self) -> ShapeRepr {
        self.base.repr(ShapeKind::Rectangle, vec![self.width, self.height])
    }

    fn from_repr(repr: &ShapeRepr) -> Result<Self> {
        let base = ShapeBase::from_repr(repr)?;
        let &[width, height] = repr.args.as_slice() else {
            return Err(Error::malformed(format!(
                "rectangle expects 2 arguments, got {}",
                repr.args.len()
            )));
        };
        if width < 0.0 || height < 0.0 {
            return Err(Error::malformed(format!("negative rectangle size {width}x{height}")));
        }
        let pivot = base.origin;
        Ok(Self {
            base,
            width,
            height,
            pivot,
        })
    }
}
