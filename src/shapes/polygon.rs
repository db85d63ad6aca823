use super::{
    CLOSE_DISTANCE, Movable, Previewable, Representable, Resizable, Rotatable, ShapeBase, ShapeKind,
};
use crate::codec::ShapeRepr;
use crate::error::{Error, Result};
use crate::geometry::{Point, angle_from_vertical, centroid, distance, polygon_contains, to_world};
use crate::model::Rgba;

/// Start, two placed vertices and the trailing preview vertex.
const MIN_DRAWING_POINTS: usize = 4;

/// Result of a click while a polygon is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonStep {
    Continues,
    Finished,
}

/// Polygon whose vertices are stored relative to `base.origin`.
///
/// While drawing, the last vertex follows the cursor. Finishing drops that
/// trailing vertex and fixes the centroid, which then serves as the pivot for
/// scaling and rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub base: ShapeBase,
    points: Vec<Point>,
    centroid: Option<Point>,
}

impl Polygon {
    pub fn new(origin: Point, fill: Rgba) -> Self {
        Self {
            base: ShapeBase::new(origin, fill),
            points: vec![Point::default(), Point::default()],
            centroid: None,
        }
    }

    /// Vertex offsets relative to the origin.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_finished(&self) -> bool {
        self.centroid.is_some()
    }

    /// Vertices in canvas coordinates, scale and rotation applied.
    pub fn outline(&self) -> Vec<Point> {
        let pivot = self.rotation_pivot();
        self.points
            .iter()
            .map(|v| to_world(self.base.origin.add(*v), pivot, self.base.scale, self.base.angle))
            .collect()
    }

    pub fn contains(&self, p: Point) -> bool {
        polygon_contains(&self.outline(), p)
    }

    fn first_vertex(&self) -> Point {
        let pivot = self.rotation_pivot();
        to_world(self.base.origin, pivot, self.base.scale, self.base.angle)
    }

    /// Handles a click while drawing. A click within [`CLOSE_DISTANCE`] of the
    /// first vertex finishes the polygon once two vertices beyond the start
    /// have been placed, so a finished polygon always has at least three; any
    /// other click fixes the trailing vertex at `target` and starts a new
    /// trailing vertex there.
    pub fn append_or_finish(&mut self, target: Point) -> PolygonStep {
        if self.is_finished() {
            return PolygonStep::Finished;
        }
        if self.points.len() >= MIN_DRAWING_POINTS
            && distance(target, self.first_vertex()) <= CLOSE_DISTANCE
        {
            self.points.pop();
            self.centroid = centroid(&self.points);
            log::debug!("polygon finished with {} vertices", self.points.len());
            return PolygonStep::Finished;
        }
        let offset = target.sub(self.base.origin);
        if let Some(last) = self.points.last_mut() {
            *last = offset;
        }
        self.points.push(offset);
        PolygonStep::Continues
    }
}

impl Movable for Polygon {
    fn move_to(&mut self, target: Point) {
        self.base.origin = target;
    }
}

impl Resizable for Polygon {
    fn resize(&mut self, delta: f32) {
        self.base.step_scale(delta);
    }
}

impl Rotatable for Polygon {
    fn rotate_towards(&mut self, target: Point) {
        let d = target.sub(self.rotation_pivot());
        self.base.angle = angle_from_vertical(d.x, d.y);
    }

    fn rotation_pivot(&self) -> Point {
        self.base.origin.add(self.centroid.unwrap_or_default())
    }
}

impl Previewable for Polygon {
    fn preview(&mut self, target: Point) {
        if self.is_finished() {
            return;
        }
        let offset = target.sub(self.base.origin);
        if let Some(last) = self.points.last_mut() {
            *last = offset;
        }
    }
}

impl Representable for Polygon {
    fn to_repr(&self) -> ShapeRepr {
        let pivot = self
            .centroid
            .or_else(|| centroid(&self.points))
            .unwrap_or_default();
        let mut args = Vec::with_capacity(2 + self.points.len() * 2);
        args.extend([pivot.x, pivot.y]);
        args.extend(self.points.iter().flat_map(|p| [p.x, p.y]));
        self.base.repr(ShapeKind::Polygon, args)
    }

    fn from_repr(repr: &ShapeRepr) -> Result<Self> {
        let base = ShapeBase::from_repr(repr)?;
        if repr.args.len() % 2 != 0 || repr.args.len() < 8 {
            return Err(Error::malformed(format!(
                "polygon expects a pivot and at least 3 vertices, got {} arguments",
                repr.args.len()
            )));
        }
        let mut pairs = repr
            .args
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]));
        let pivot = pairs.next();
        Ok(Self {
            base,
            points: pairs.collect(),
            centroid: pivot,
        })
    }
}
