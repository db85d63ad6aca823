use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn add(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

pub fn distance(p0: Point, p1: Point) -> f32 {
    let dx = p0.x - p1.x;
    let dy = p0.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle in degrees of the vector `(dx, dy)`, measured clockwise on screen
/// (y grows downwards) from straight up. Result lies in `(-180, 180]`.
pub fn angle_from_vertical(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    dx.atan2(-dy).to_degrees()
}

/// Rotates `v` clockwise on screen by `degrees`.
pub fn rotate_vec(v: Point, degrees: f32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Maps a local point into world space: scale and rotate about `pivot`.
pub fn to_world(local: Point, pivot: Point, scale: f32, degrees: f32) -> Point {
    pivot.add(rotate_vec(local.sub(pivot).scale(scale), degrees))
}

/// Inverse of [`to_world`]. Returns `None` when `scale` is zero.
pub fn to_local(world: Point, pivot: Point, scale: f32, degrees: f32) -> Option<Point> {
    if scale.abs() <= f32::EPSILON {
        return None;
    }
    let unrotated = rotate_vec(world.sub(pivot), -degrees);
    Some(pivot.add(unrotated.scale(1.0 / scale)))
}

/// Even-odd ray cast. Fewer than three points never contain anything.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let vi = points[i];
        let vj = points[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::default(), |acc, p| acc.add(*p));
    Some(sum.scale(1.0 / points.len() as f32))
}
