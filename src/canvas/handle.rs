use crate::geometry::{Point, distance, rotate_vec};
use crate::shapes::Shape;

/// The knob shown above a selected rotatable shape. Its position is derived
/// from the shape every time, so it follows moves, resizes and rotations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationHandle {
    pub pivot: Point,
    pub position: Point,
    pub radius: f32,
    /// True while the handle is being dragged.
    pub active: bool,
}

impl RotationHandle {
    /// `None` for shapes that cannot rotate.
    pub fn for_shape(shape: &Shape, offset: f32, radius: f32, active: bool) -> Option<Self> {
        let pivot = shape.as_rotatable()?.rotation_pivot();
        let position = pivot.add(rotate_vec(Point::new(0.0, -offset), shape.angle()));
        Some(Self {
            pivot,
            position,
            radius,
            active,
        })
    }

    pub fn hit(&self, p: Point) -> bool {
        distance(self.position, p) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgba;
    use crate::shapes::{Circle, Previewable, Rectangle, Rotatable};

    #[test]
    fn handle_sits_above_pivot_and_turns_with_shape() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), Rgba::BLACK);
        rect.preview(Point::new(20.0, 10.0));
        let handle = RotationHandle::for_shape(&Shape::Rectangle(rect.clone()), 30.0, 5.0, false)
            .unwrap();
        assert_eq!(handle.pivot, Point::new(10.0, 5.0));
        assert_eq!(handle.position, Point::new(10.0, -25.0));
        assert!(handle.hit(Point::new(12.0, -24.0)));
        assert!(!handle.hit(Point::new(10.0, 5.0)));

        rect.rotate_towards(Point::new(100.0, 5.0));
        let turned = RotationHandle::for_shape(&Shape::Rectangle(rect), 30.0, 5.0, false).unwrap();
        assert!((turned.position.x - 40.0).abs() < 1e-3);
        assert!((turned.position.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn circles_have_no_handle() {
        let circle = Shape::Circle(Circle::new(Point::new(1.0, 1.0), Rgba::BLACK));
        assert!(RotationHandle::for_shape(&circle, 30.0, 5.0, false).is_none());
    }
}
