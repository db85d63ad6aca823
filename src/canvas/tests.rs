use super::*;
use crate::shapes::ShapeKind;
use std::cell::RefCell;
use std::rc::Rc;

const EPSILON: f32 = 0.0001;
const RED: Rgba = Rgba::rgb(255, 0, 0);
const GREEN: Rgba = Rgba::rgb(0, 255, 0);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn circle(canvas: &Canvas, id: ShapeId) -> crate::shapes::Circle {
    match canvas.shape(id) {
        Some(Shape::Circle(c)) => c.clone(),
        other => panic!("expected circle, got {other:?}"),
    }
}

fn rectangle(canvas: &Canvas, id: ShapeId) -> crate::shapes::Rectangle {
    match canvas.shape(id) {
        Some(Shape::Rectangle(r)) => r.clone(),
        other => panic!("expected rectangle, got {other:?}"),
    }
}

/// Draws a committed 20x10 rectangle at the origin and returns its id.
fn draw_rectangle(canvas: &mut Canvas) -> ShapeId {
    canvas.select_tool(Tool::Rectangle);
    canvas.handle(PointerEvent::pressed(0.0, 0.0), &RED);
    let id = canvas.preview_id().unwrap();
    canvas.handle(PointerEvent::moved(20.0, 10.0), &RED);
    canvas.handle(PointerEvent::pressed(20.0, 10.0), &RED);
    assert_eq!(canvas.state(), CanvasState::Idle);
    id
}

#[test]
fn press_without_tool_is_ignored() {
    let mut canvas = Canvas::default();
    canvas.handle(PointerEvent::pressed(5.0, 5.0), &RED);
    assert!(canvas.shapes().is_empty());
    assert_eq!(canvas.state(), CanvasState::Idle);
}

#[test]
fn circle_preview_then_commit() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Circle);
    canvas.handle(PointerEvent::pressed(10.0, 10.0), &RED);
    let id = canvas.preview_id().unwrap();
    assert_eq!(canvas.state(), CanvasState::Previewing(id));

    canvas.handle(PointerEvent::moved(13.0, 14.0), &RED);
    assert!(approx_eq(circle(&canvas, id).radius, 5.0));

    canvas.handle(PointerEvent::pressed(13.0, 14.0), &RED);
    assert_eq!(canvas.state(), CanvasState::Idle);
    assert_eq!(canvas.shapes().len(), 1);
    assert_eq!(canvas.shape(id).unwrap().fill(), RED);
}

#[test]
fn secondary_press_cancels_preview() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Rectangle);
    canvas.handle(PointerEvent::pressed(0.0, 0.0), &RED);
    let id = canvas.preview_id().unwrap();
    canvas.handle(PointerEvent::dragged(20.0, 10.0), &RED);
    let r = rectangle(&canvas, id);
    assert_eq!(r.base.origin, Point::new(0.0, 0.0));
    assert_eq!((r.width, r.height), (20.0, 10.0));

    canvas.handle(PointerEvent::secondary_pressed(20.0, 10.0), &RED);
    assert!(canvas.shapes().is_empty());
    assert_eq!(canvas.state(), CanvasState::Idle);

    // no-op when nothing is in preview
    canvas.handle(PointerEvent::secondary_pressed(1.0, 1.0), &RED);
    assert!(canvas.shapes().is_empty());
}

#[test]
fn fill_is_read_when_the_shape_is_created() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Circle);
    let picked = RefCell::new(RED);
    let source = || *picked.borrow();
    canvas.handle(PointerEvent::pressed(0.0, 0.0), &source);
    *picked.borrow_mut() = GREEN;
    canvas.handle(PointerEvent::pressed(4.0, 0.0), &source);
    canvas.handle(PointerEvent::pressed(50.0, 50.0), &source);
    let fills: Vec<_> = canvas.shapes().iter().map(|s| s.shape.fill()).collect();
    assert_eq!(fills, [RED, GREEN]);
}

#[test]
fn switching_tools_discards_preview() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Circle);
    canvas.handle(PointerEvent::pressed(10.0, 10.0), &RED);
    canvas.select_tool(Tool::Rectangle);
    assert!(canvas.shapes().is_empty());
    assert_eq!(canvas.preview_id(), None);

    canvas.handle(PointerEvent::pressed(0.0, 0.0), &RED);
    canvas.handle(PointerEvent::moved(5.0, 5.0), &RED);
    assert_eq!(canvas.shapes().len(), 1);
    assert_eq!(canvas.shapes()[0].shape.kind(), ShapeKind::Rectangle);
}

#[test]
fn reselecting_the_same_tool_keeps_preview() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Polygon);
    canvas.handle(PointerEvent::pressed(10.0, 10.0), &RED);
    canvas.select_tool(Tool::Polygon);
    assert!(canvas.preview_id().is_some());
}

#[test]
fn polygon_closes_near_first_vertex() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Polygon);
    canvas.handle(PointerEvent::pressed(100.0, 100.0), &RED);
    let id = canvas.preview_id().unwrap();
    canvas.handle(PointerEvent::pressed(160.0, 100.0), &RED);
    canvas.handle(PointerEvent::moved(130.0, 160.0), &RED);
    canvas.handle(PointerEvent::pressed(130.0, 160.0), &RED);
    assert_eq!(canvas.state(), CanvasState::Previewing(id));

    canvas.handle(PointerEvent::moved(104.0, 98.0), &RED);
    canvas.handle(PointerEvent::pressed(104.0, 98.0), &RED);
    assert_eq!(canvas.state(), CanvasState::Idle);
    let Some(Shape::Polygon(p)) = canvas.shape(id) else {
        panic!("expected polygon");
    };
    assert!(p.is_finished());
    assert_eq!(p.points().len(), 3);
}

#[test]
fn edit_press_selects_topmost_shape() {
    let mut canvas = Canvas::default();
    let below = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Circle);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &GREEN);
    let above = canvas.preview_id().unwrap();
    canvas.handle(PointerEvent::moved(13.0, 5.0), &GREEN);
    canvas.handle(PointerEvent::pressed(13.0, 5.0), &GREEN);

    canvas.select_tool(Tool::Edit);
    assert_eq!(canvas.state(), CanvasState::EditingIdle);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);
    assert_eq!(canvas.selected_id(), Some(above));
    assert!(canvas.is_highlighted(above));
    assert!(canvas.rotation_handle().is_none());

    canvas.handle(PointerEvent::pressed(18.0, 8.0), &RED);
    assert_eq!(canvas.selected_id(), Some(below));
    assert!(!canvas.is_highlighted(above));
    assert!(canvas.rotation_handle().is_some());

    canvas.handle(PointerEvent::pressed(200.0, 200.0), &RED);
    assert_eq!(canvas.state(), CanvasState::EditingIdle);
    assert!(canvas.rotation_handle().is_none());
}

#[test]
fn drag_moves_selected_shape() {
    let mut canvas = Canvas::default();
    let id = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);
    canvas.handle(PointerEvent::dragged(100.0, 80.0), &RED);
    assert_eq!(rectangle(&canvas, id).center(), Point::new(100.0, 80.0));

    // plain moves do not drag
    canvas.handle(PointerEvent::moved(0.0, 0.0), &RED);
    assert_eq!(rectangle(&canvas, id).center(), Point::new(100.0, 80.0));
}

#[test]
fn handle_drag_rotates_without_moving() {
    let mut canvas = Canvas::default();
    let id = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);

    let handle = canvas.rotation_handle().unwrap();
    assert_eq!(handle.position, Point::new(10.0, -35.0));
    assert!(!handle.active);

    canvas.handle(PointerEvent::pressed(10.0, -35.0), &RED);
    assert_eq!(canvas.state(), CanvasState::EditingRotating(id));
    assert!(canvas.rotation_handle().unwrap().active);

    canvas.handle(PointerEvent::dragged(50.0, 5.0), &RED);
    let r = rectangle(&canvas, id);
    assert!(approx_eq(r.base.angle, 90.0));
    assert_eq!(r.center(), Point::new(10.0, 5.0));

    canvas.handle(PointerEvent::released(50.0, 5.0), &RED);
    assert_eq!(canvas.state(), CanvasState::EditingSelected(id));
}

#[test]
fn scroll_resizes_selection_only() {
    let mut canvas = Canvas::default();
    canvas.select_tool(Tool::Circle);
    canvas.handle(PointerEvent::pressed(10.0, 10.0), &RED);
    let id = canvas.preview_id().unwrap();
    canvas.handle(PointerEvent::moved(13.0, 14.0), &RED);
    canvas.handle(PointerEvent::pressed(13.0, 14.0), &RED);

    canvas.handle(PointerEvent::scrolled(10.0, 10.0, 10.0), &RED);
    assert!(approx_eq(circle(&canvas, id).radius, 5.0));

    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::scrolled(10.0, 10.0, 10.0), &RED);
    assert!(approx_eq(circle(&canvas, id).radius, 5.0));

    canvas.handle(PointerEvent::pressed(10.0, 10.0), &RED);
    canvas.handle(PointerEvent::scrolled(10.0, 10.0, 10.0), &RED);
    assert!(approx_eq(circle(&canvas, id).radius, 6.0));
}

#[test]
fn secondary_press_recolors_selection() {
    let mut canvas = Canvas::default();
    let id = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::secondary_pressed(10.0, 5.0), &GREEN);
    assert_eq!(canvas.shape(id).unwrap().fill(), RED);

    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);
    canvas.handle(PointerEvent::secondary_pressed(10.0, 5.0), &GREEN);
    assert_eq!(canvas.shape(id).unwrap().fill(), GREEN);
}

#[test]
fn leaving_tool_edit_clears_selection() {
    let mut canvas = Canvas::default();
    let id = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);
    assert!(canvas.is_highlighted(id));

    canvas.select_tool(Tool::Circle);
    assert_eq!(canvas.selected_id(), None);
    assert!(!canvas.is_highlighted(id));
    assert!(canvas.rotation_handle().is_none());
    assert_eq!(canvas.state(), CanvasState::Idle);
}

#[test]
fn cursor_tracks_pointer_and_exit() {
    let mut canvas = Canvas::default();
    assert_eq!(canvas.cursor_display(), OUTSIDE);
    canvas.handle(PointerEvent::moved(3.0, 4.0), &RED);
    assert_eq!(canvas.cursor(), Some(Point::new(3.0, 4.0)));
    canvas.handle(PointerEvent::exited(), &RED);
    assert_eq!(canvas.cursor(), None);
    assert_eq!(canvas.cursor_display(), Point::new(-1.0, -1.0));
}

#[test]
fn subscribers_see_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut canvas = Canvas::default();
    let sink = Rc::clone(&seen);
    canvas.subscribe(move |change| sink.borrow_mut().push(change.clone()));

    let id = draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Edit);
    canvas.handle(PointerEvent::pressed(10.0, 5.0), &RED);

    let seen = seen.borrow();
    assert_eq!(seen[0], CanvasChange::ToolChanged(Some(Tool::Rectangle)));
    assert!(seen.contains(&CanvasChange::ShapesChanged));
    assert!(seen.contains(&CanvasChange::ToolChanged(Some(Tool::Edit))));
    assert_eq!(seen.last(), Some(&CanvasChange::SelectionChanged(Some(id))));
}

#[test]
fn save_skips_preview_and_load_replaces() {
    let mut canvas = Canvas::default();
    draw_rectangle(&mut canvas);
    canvas.select_tool(Tool::Circle);
    canvas.handle(PointerEvent::pressed(50.0, 50.0), &RED);
    assert_eq!(canvas.shapes().len(), 2);

    let bytes = canvas.save_bytes().unwrap();
    let mut other = Canvas::default();
    assert_eq!(other.load_bytes(&bytes).unwrap(), 1);
    assert_eq!(other.shapes()[0].shape.kind(), ShapeKind::Rectangle);
    assert_eq!(other.state(), CanvasState::Idle);
}

#[test]
fn failed_load_leaves_canvas_untouched() {
    let mut canvas = Canvas::default();
    let id = draw_rectangle(&mut canvas);
    let err = canvas.load_bytes(b"{\"version\":1,\"shapes\":[{\"kind\":\"circle\"}]}");
    assert!(err.unwrap_err().is_malformed_data());
    assert_eq!(canvas.shapes().len(), 1);
    assert!(canvas.shape(id).is_some());
}

#[test]
fn ids_are_not_reused_after_clear() {
    let mut canvas = Canvas::default();
    let first = draw_rectangle(&mut canvas);
    canvas.clear();
    assert!(canvas.shapes().is_empty());
    canvas.handle(PointerEvent::pressed(0.0, 0.0), &RED);
    let second = canvas.preview_id().unwrap();
    assert!(second > first);
}
