//! Canvas interaction engine.
//!
//! [`Canvas`] owns the shape list (draw order = list order), the active tool
//! and the preview or selection. Pointer events are fed in one at a time via
//! [`Canvas::handle`]; each is processed to completion and never fails
//! outward. Collaborators read state back through accessors or register a
//! callback with [`Canvas::subscribe`].

use crate::codec;
use crate::error::Result;
use crate::geometry::Point;
use crate::model::{FillSource, Rgba, ShapeId};
use crate::shapes::{Movable, PolygonStep, Previewable, Resizable, Shape, create_shape};
use crate::tool::{Tool, ToolSelector};
use std::path::Path;

mod events;
mod handle;

pub use events::{PointerButton, PointerEvent, PointerEventKind};
pub use handle::RotationHandle;

/// Cursor coordinate reported while the pointer is outside the canvas.
pub const OUTSIDE: Point = Point::new(-1.0, -1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasState {
    Idle,
    Previewing(ShapeId),
    EditingIdle,
    EditingSelected(ShapeId),
    EditingRotating(ShapeId),
}

/// Notification sent to subscribers after the canvas changed.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasChange {
    ShapesChanged,
    SelectionChanged(Option<ShapeId>),
    ToolChanged(Option<Tool>),
    CursorMoved(Option<Point>),
    Diagnostic(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasConfig {
    /// Distance from the rotation pivot to the rotation handle.
    pub handle_offset: f32,
    pub handle_radius: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            handle_offset: 40.0,
            handle_radius: 6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasShape {
    pub id: ShapeId,
    pub shape: Shape,
}

type Observer = Box<dyn FnMut(&CanvasChange)>;

pub struct Canvas {
    shapes: Vec<CanvasShape>,
    next_id: u64,
    tools: ToolSelector,
    state: CanvasState,
    cursor: Option<Point>,
    config: CanvasConfig,
    observers: Vec<Observer>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 1,
            tools: ToolSelector::new(),
            state: CanvasState::Idle,
            cursor: None,
            config,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&CanvasChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: CanvasChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    pub fn state(&self) -> CanvasState {
        self.state
    }

    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    pub fn current_tool(&self) -> Option<Tool> {
        self.tools.current()
    }

    /// All shapes in draw order, the preview shape included.
    pub fn shapes(&self) -> &[CanvasShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id).map(|s| &s.shape)
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id).map(|s| &mut s.shape)
    }

    pub fn preview_id(&self) -> Option<ShapeId> {
        match self.state {
            CanvasState::Previewing(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        match self.state {
            CanvasState::EditingSelected(id) | CanvasState::EditingRotating(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_highlighted(&self, id: ShapeId) -> bool {
        self.selected_id() == Some(id)
    }

    /// The rotation handle, when the selected shape can rotate.
    pub fn rotation_handle(&self) -> Option<RotationHandle> {
        let id = self.selected_id()?;
        let shape = self.shape(id)?;
        let active = matches!(self.state, CanvasState::EditingRotating(_));
        RotationHandle::for_shape(
            shape,
            self.config.handle_offset,
            self.config.handle_radius,
            active,
        )
    }

    /// Last known cursor position, `None` once the pointer left the canvas.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Cursor position for coordinate read-outs; [`OUTSIDE`] when outside.
    pub fn cursor_display(&self) -> Point {
        self.cursor.unwrap_or(OUTSIDE)
    }

    /// Topmost shape containing `p`.
    pub fn shape_at(&self, p: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.shape.contains(p))
            .map(|s| s.id)
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tools.current() == Some(tool) {
            return;
        }
        self.discard_preview();
        let had_selection = self.selected_id().is_some();
        self.tools.select(tool);
        self.state = Self::rest_state(Some(tool));
        log::debug!("tool switched to {tool}");
        if had_selection {
            self.notify(CanvasChange::SelectionChanged(None));
        }
        self.notify(CanvasChange::ToolChanged(Some(tool)));
    }

    fn rest_state(tool: Option<Tool>) -> CanvasState {
        match tool {
            Some(Tool::Edit) => CanvasState::EditingIdle,
            _ => CanvasState::Idle,
        }
    }

    pub fn handle(&mut self, event: PointerEvent, fill: &dyn FillSource) {
        match event.kind {
            PointerEventKind::Move => {
                self.set_cursor(Some(event.pos));
                self.on_pointer_moved(event.pos, None);
            }
            PointerEventKind::Drag(button) => {
                self.set_cursor(Some(event.pos));
                self.on_pointer_moved(event.pos, Some(button));
            }
            PointerEventKind::Press(button) => {
                self.set_cursor(Some(event.pos));
                match button {
                    PointerButton::Primary => self.on_primary_press(event.pos, fill),
                    PointerButton::Secondary => self.on_secondary_press(fill),
                }
            }
            PointerEventKind::Release(PointerButton::Primary) => {
                if let CanvasState::EditingRotating(id) = self.state {
                    self.state = CanvasState::EditingSelected(id);
                }
            }
            PointerEventKind::Release(PointerButton::Secondary) => {}
            PointerEventKind::Exit => self.set_cursor(None),
            PointerEventKind::Scroll(delta) => self.on_scroll(delta),
        }
    }

    fn set_cursor(&mut self, cursor: Option<Point>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.notify(CanvasChange::CursorMoved(cursor));
        }
    }

    fn on_pointer_moved(&mut self, pos: Point, button: Option<PointerButton>) {
        match self.state {
            CanvasState::Previewing(id) => {
                let expected = self.tools.current().and_then(Tool::shape_kind);
                let Some(shape) = self.shape_mut(id) else {
                    self.state = Self::rest_state(self.tools.current());
                    return;
                };
                if expected != Some(shape.kind()) {
                    log::debug!("discarding stale {} preview", shape.kind());
                    self.discard_preview();
                    return;
                }
                shape.preview(pos);
                self.notify(CanvasChange::ShapesChanged);
            }
            CanvasState::EditingSelected(id) if button == Some(PointerButton::Primary) => {
                if let Some(shape) = self.shape_mut(id) {
                    shape.move_to(pos);
                    self.notify(CanvasChange::ShapesChanged);
                }
            }
            CanvasState::EditingRotating(id) => {
                if let Some(rotatable) = self.shape_mut(id).and_then(Shape::as_rotatable_mut) {
                    rotatable.rotate_towards(pos);
                    self.notify(CanvasChange::ShapesChanged);
                }
            }
            _ => {}
        }
    }

    fn on_primary_press(&mut self, pos: Point, fill: &dyn FillSource) {
        let Some(tool) = self.tools.current() else {
            log::trace!("press ignored, no tool selected");
            return;
        };
        if tool.is_edit() {
            self.edit_press(pos);
            return;
        }
        match self.state {
            CanvasState::Previewing(id) => self.advance_preview(id, pos),
            _ => self.start_preview(tool, pos, fill.current_fill()),
        }
    }

    fn start_preview(&mut self, tool: Tool, pos: Point, fill: Rgba) {
        match create_shape(tool, pos, fill) {
            Ok(shape) => {
                let id = ShapeId(self.next_id);
                self.next_id += 1;
                log::debug!("preview {id} started: {} at ({}, {})", shape.kind(), pos.x, pos.y);
                self.shapes.push(CanvasShape { id, shape });
                self.state = CanvasState::Previewing(id);
                self.notify(CanvasChange::ShapesChanged);
            }
            Err(e) => {
                log::warn!("cannot start preview: {e}");
                self.notify(CanvasChange::Diagnostic(e.to_string()));
            }
        }
    }

    fn advance_preview(&mut self, id: ShapeId, pos: Point) {
        let step = match self.shape_mut(id) {
            Some(Shape::Polygon(polygon)) => polygon.append_or_finish(pos),
            Some(_) => PolygonStep::Finished,
            None => {
                self.state = CanvasState::Idle;
                return;
            }
        };
        match step {
            PolygonStep::Continues => {}
            PolygonStep::Finished => {
                log::debug!("preview {id} committed");
                self.state = CanvasState::Idle;
            }
        }
        self.notify(CanvasChange::ShapesChanged);
    }

    fn edit_press(&mut self, pos: Point) {
        if let (Some(id), Some(handle)) = (self.selected_id(), self.rotation_handle()) {
            if handle.hit(pos) {
                self.state = CanvasState::EditingRotating(id);
                return;
            }
        }
        let previous = self.selected_id();
        self.state = match self.shape_at(pos) {
            Some(id) => CanvasState::EditingSelected(id),
            None => CanvasState::EditingIdle,
        };
        let current = self.selected_id();
        if previous != current {
            log::debug!("selection changed to {current:?}");
            self.notify(CanvasChange::SelectionChanged(current));
        }
    }

    fn on_secondary_press(&mut self, fill: &dyn FillSource) {
        match self.state {
            CanvasState::Previewing(_) => self.discard_preview(),
            CanvasState::EditingSelected(id) | CanvasState::EditingRotating(id) => {
                let color = fill.current_fill();
                if let Some(shape) = self.shape_mut(id) {
                    shape.set_fill(color);
                    self.notify(CanvasChange::ShapesChanged);
                }
            }
            _ => log::trace!("secondary press ignored in {:?}", self.state),
        }
    }

    fn on_scroll(&mut self, delta: f32) {
        let CanvasState::EditingSelected(id) = self.state else {
            log::trace!("scroll ignored in {:?}", self.state);
            return;
        };
        if let Some(shape) = self.shape_mut(id) {
            shape.resize(delta);
            self.notify(CanvasChange::ShapesChanged);
        }
    }

    /// Removes the preview shape, if any, and returns to the tool's rest state.
    fn discard_preview(&mut self) {
        let Some(id) = self.preview_id() else {
            return;
        };
        self.shapes.retain(|s| s.id != id);
        self.state = Self::rest_state(self.tools.current());
        log::debug!("preview {id} discarded");
        self.notify(CanvasChange::ShapesChanged);
    }

    /// Committed shapes in draw order; an in-progress preview is left out.
    pub fn committed_shapes(&self) -> impl Iterator<Item = &Shape> {
        let preview = self.preview_id();
        self.shapes
            .iter()
            .filter(move |s| Some(s.id) != preview)
            .map(|s| &s.shape)
    }

    /// Replaces every shape. Preview and selection are dropped.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        let had_selection = self.selected_id().is_some();
        let mut next_id = self.next_id;
        self.shapes = shapes
            .into_iter()
            .map(|shape| {
                let id = ShapeId(next_id);
                next_id += 1;
                CanvasShape { id, shape }
            })
            .collect();
        self.next_id = next_id;
        self.state = Self::rest_state(self.tools.current());
        if had_selection {
            self.notify(CanvasChange::SelectionChanged(None));
        }
        self.notify(CanvasChange::ShapesChanged);
    }

    pub fn clear(&mut self) {
        self.replace_shapes(Vec::new());
    }

    pub fn save_bytes(&self) -> Result<Vec<u8>> {
        codec::save(self.committed_shapes())
    }

    /// Decodes `bytes` fully before touching the canvas; on error nothing
    /// changes. Returns the number of shapes loaded.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let shapes = codec::load(bytes)?;
        let count = shapes.len();
        self.replace_shapes(shapes);
        Ok(count)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save_to_path(path, self.committed_shapes())
    }

    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let shapes = codec::load_from_path(path)?;
        let count = shapes.len();
        self.replace_shapes(shapes);
        Ok(count)
    }
}

#[cfg(test)]
mod tests;
