use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEventKind {
    Move,
    Drag(PointerButton),
    Press(PointerButton),
    Release(PointerButton),
    Exit,
    /// Positive values grow, negative values shrink.
    Scroll(f32),
}

/// One pointer event in canvas-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pos: Point,
    pub kind: PointerEventKind,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, kind: PointerEventKind) -> Self {
        Self {
            pos: Point::new(x, y),
            kind,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerEventKind::Move)
    }

    pub fn dragged(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerEventKind::Drag(PointerButton::Primary))
    }

    pub fn pressed(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerEventKind::Press(PointerButton::Primary))
    }

    pub fn secondary_pressed(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerEventKind::Press(PointerButton::Secondary))
    }

    pub fn released(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerEventKind::Release(PointerButton::Primary))
    }

    pub fn scrolled(x: f32, y: f32, delta: f32) -> Self {
        Self::new(x, y, PointerEventKind::Scroll(delta))
    }

    pub fn exited() -> Self {
        Self::new(-1.0, -1.0, PointerEventKind::Exit)
    }
}
