use eframe::egui;
use shapepad::canvas::{Canvas, RotationHandle};
use shapepad::geometry::Point;
use shapepad::model::Rgba;
use shapepad::shapes::{CLOSE_DISTANCE, Shape};
use shapepad::tool::Tool;

const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const OUTLINE: egui::Color32 = egui::Color32::from_gray(20);

pub(super) fn tool_button(ui: &mut egui::Ui, tool: Tool, canvas: &mut Canvas) {
    let active = canvas.current_tool() == Some(tool);
    if ui.selectable_label(active, tool.label()).clicked() {
        canvas.select_tool(tool);
    }
}

pub(super) fn color_row(ui: &mut egui::Ui, rgba: &mut Rgba) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let presets = [
            Rgba::rgb(20, 20, 20),
            Rgba::rgb(200, 40, 40),
            Rgba::rgb(40, 140, 60),
            Rgba::rgb(48, 128, 255),
            Rgba::rgb(200, 140, 40),
            Rgba::rgb(130, 60, 180),
        ];
        for c in presets {
            if ui
                .add_sized([18.0, 18.0], egui::Button::new("").fill(to_color32(c)))
                .clicked()
            {
                *rgba = c;
                changed = true;
            }
        }
        let mut arr = [rgba.r, rgba.g, rgba.b, rgba.a];
        if ui.color_edit_button_srgba_unmultiplied(&mut arr).changed() {
            *rgba = Rgba {
                r: arr[0],
                g: arr[1],
                b: arr[2],
                a: arr[3],
            };
            changed = true;
        }
    });
    changed
}

fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_screen(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    egui::pos2(origin.x + p.x, origin.y + p.y)
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
}

/// Paints every shape in draw order, then the rotation handle on top.
pub(super) fn draw_canvas(painter: &egui::Painter, origin: egui::Pos2, canvas: &Canvas) {
    let preview = canvas.preview_id();
    for entry in canvas.shapes() {
        let highlighted = canvas.is_highlighted(entry.id);
        draw_shape(painter, origin, &entry.shape, highlighted, preview == Some(entry.id));
    }
    if let Some(handle) = canvas.rotation_handle() {
        draw_rotation_handle(painter, origin, &handle);
    }
}

fn draw_shape(
    painter: &egui::Painter,
    origin: egui::Pos2,
    shape: &Shape,
    highlighted: bool,
    in_preview: bool,
) {
    let fill = to_color32(shape.fill());
    let stroke = if highlighted {
        egui::Stroke::new(2.0, HIGHLIGHT)
    } else {
        egui::Stroke::new(1.0, OUTLINE)
    };
    match shape {
        Shape::Circle(c) => {
            let center = to_screen(origin, c.center());
            painter.circle_filled(center, c.drawn_radius(), fill);
            painter.circle_stroke(center, c.drawn_radius(), stroke);
        }
        Shape::Rectangle(r) => {
            let points: Vec<_> = r.corners().iter().map(|p| to_screen(origin, *p)).collect();
            painter.add(egui::Shape::convex_polygon(points, fill, stroke));
        }
        Shape::Polygon(p) => {
            let points: Vec<_> = p.outline().iter().map(|v| to_screen(origin, *v)).collect();
            if in_preview && !p.is_finished() {
                draw_polygon_path(painter, &points, fill);
            } else {
                fill_polygon(painter, &points, fill);
                painter.add(egui::Shape::closed_line(points, stroke));
            }
        }
    }
}

/// Open path of a polygon being drawn, with a ring around the closing point.
fn draw_polygon_path(painter: &egui::Painter, points: &[egui::Pos2], color: egui::Color32) {
    let Some(&first) = points.first() else {
        return;
    };
    painter.add(egui::Shape::line(points.to_vec(), egui::Stroke::new(2.0, color)));
    if points.len() >= 3 {
        painter.circle_stroke(first, CLOSE_DISTANCE, egui::Stroke::new(1.0, HIGHLIGHT));
    }
}

fn draw_rotation_handle(painter: &egui::Painter, origin: egui::Pos2, handle: &RotationHandle) {
    let pivot = to_screen(origin, handle.pivot);
    let knob = to_screen(origin, handle.position);
    painter.line_segment([pivot, knob], egui::Stroke::new(1.0, HIGHLIGHT));
    let fill = if handle.active {
        HIGHLIGHT
    } else {
        egui::Color32::WHITE
    };
    painter.circle_filled(knob, handle.radius, fill);
    painter.circle_stroke(knob, handle.radius, egui::Stroke::new(1.5, HIGHLIGHT));
}

/// Fills a simple polygon, convex or not, as a triangle mesh.
fn fill_polygon(painter: &egui::Painter, points: &[egui::Pos2], color: egui::Color32) {
    let indices = triangulate(points);
    if indices.is_empty() {
        return;
    }
    let mut mesh = egui::Mesh::default();
    for p in points {
        mesh.colored_vertex(*p, color);
    }
    mesh.indices = indices;
    painter.add(egui::Shape::mesh(mesh));
}

fn cross(a: egui::Pos2, b: egui::Pos2, c: egui::Pos2) -> f32 {
    (b - a).x * (c - b).y - (b - a).y * (c - b).x
}

fn in_triangle(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2, c: egui::Pos2) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Ear clipping. Returns mesh indices into `points`; degenerate input yields
/// fewer triangles rather than an error.
fn triangulate(points: &[egui::Pos2]) -> Vec<u32> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let twice_area: f32 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    let mut ring: Vec<usize> = (0..n).collect();
    if twice_area < 0.0 {
        ring.reverse();
    }

    let mut indices = Vec::with_capacity((n - 2) * 3);
    while ring.len() > 3 {
        let m = ring.len();
        let ear = (0..m).find(|&i| {
            let (ia, ib, ic) = (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);
            let (a, b, c) = (points[ia], points[ib], points[ic]);
            cross(a, b, c) > 0.0
                && !ring
                    .iter()
                    .any(|&k| k != ia && k != ib && k != ic && in_triangle(points[k], a, b, c))
        });
        let Some(i) = ear else {
            break;
        };
        let (ia, ib, ic) = (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);
        indices.extend([ia as u32, ib as u32, ic as u32]);
        ring.remove(i);
    }
    if let &[a, b, c] = ring.as_slice() {
        indices.extend([a as u32, b as u32, c as u32]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_splits_into_two_triangles() {
        let square = [
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
            egui::pos2(10.0, 10.0),
            egui::pos2(0.0, 10.0),
        ];
        assert_eq!(triangulate(&square).len(), 6);
    }

    #[test]
    fn concave_outline_is_fully_covered() {
        // an "L" shape
        let l = [
            egui::pos2(0.0, 0.0),
            egui::pos2(20.0, 0.0),
            egui::pos2(20.0, 10.0),
            egui::pos2(10.0, 10.0),
            egui::pos2(10.0, 30.0),
            egui::pos2(0.0, 30.0),
        ];
        let indices = triangulate(&l);
        assert_eq!(indices.len(), (l.len() - 2) * 3);
        let area: f32 = indices
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (l[t[0] as usize], l[t[1] as usize], l[t[2] as usize]);
                ((b - a).x * (c - a).y - (b - a).y * (c - a).x).abs() * 0.5
            })
            .sum();
        assert!((area - 400.0).abs() < 1e-3);
    }

    #[test]
    fn too_few_points_give_nothing() {
        assert!(triangulate(&[egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)]).is_empty());
    }
}
