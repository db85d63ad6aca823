use crate::shapes::ShapeKind;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    Circle,
    Rectangle,
    Polygon,
    Edit,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Circle, Tool::Rectangle, Tool::Polygon, Tool::Edit];

    /// Shape kind created by this tool; `None` for [`Tool::Edit`].
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Polygon => Some(ShapeKind::Polygon),
            Tool::Edit => None,
        }
    }

    pub fn is_edit(self) -> bool {
        self == Tool::Edit
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Circle => "circle",
            Tool::Rectangle => "rect",
            Tool::Polygon => "poly",
            Tool::Edit => "edit",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Holds the active tool. Nothing is selected until the first `select`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolSelector {
    current: Option<Tool>,
}

impl ToolSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, tool: Tool) {
        self.current = Some(tool);
    }

    pub fn current(&self) -> Option<Tool> {
        self.current
    }
}
