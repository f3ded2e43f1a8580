use egui::{Pos2, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::event::Outbox;
use crate::selection::DEFAULT_DASH_LENGTH;
use crate::style::DrawingStyle;

mod draw_stroke_helper;
mod draw_stroke_tool;
mod move_tool;
mod pan_tool;
mod selection_tool;
mod shape_tool;

pub use draw_stroke_helper::DrawStrokeHelper;
pub use draw_stroke_tool::DrawStrokeTool;
pub use move_tool::MoveTool;
pub use pan_tool::PanTool;
pub use selection_tool::MarqueeTool;
pub use shape_tool::ShapeTool;

/// Everything a tool may touch while handling a pointer event
pub struct ToolContext<'a> {
    /// Committed drawing surface
    pub base: &'a mut RgbaImage,
    /// Scratch surface for in-progress previews
    pub effects: &'a mut RgbaImage,
    pub style: &'a DrawingStyle,
    /// Dash length of marquee outlines
    pub dash_length: u32,
    /// Accumulated panning of the view
    pub view_offset: &'a mut Vec2,
    /// Messages to post once the tool returns
    pub outbox: &'a mut Outbox,
}

/// Tool trait defines the interface for all canvas tools
pub trait Tool: std::fmt::Debug {
    fn kind(&self) -> ToolKind;

    /// Return the name of the tool
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether gestures change pixels and so need a snapshot first
    fn is_mutator(&self) -> bool {
        true
    }

    /// Advisory for UI: the tool reads the shared colour
    fn supports_color(&self) -> bool {
        false
    }

    /// Advisory for UI: the tool reads the shared width
    fn supports_width(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2);

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2);

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2);

    /// Forget any gesture in progress
    fn cancel(&mut self) {}
}

/// Identifies a tool in `ToolChanged` broadcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Line,
    Rectangle,
    Marquee,
    Move,
    Pan,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Marquee,
        ToolKind::Move,
        ToolKind::Pan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Marquee => "Marquee",
            ToolKind::Move => "Move",
            ToolKind::Pan => "Pan",
        }
    }

    // Factory function to create a new tool of this kind
    pub fn instantiate(self) -> Box<dyn Tool> {
        match self {
            ToolKind::Pencil => Box::new(DrawStrokeTool::pencil()),
            ToolKind::Eraser => Box::new(DrawStrokeTool::eraser()),
            ToolKind::Line => Box::new(ShapeTool::line()),
            ToolKind::Rectangle => Box::new(ShapeTool::rectangle()),
            ToolKind::Marquee => Box::new(MarqueeTool::new()),
            ToolKind::Move => Box::new(MoveTool::new()),
            ToolKind::Pan => Box::new(PanTool::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Dragged,
    Up,
}

/// The active tool, the shared drawing style and the gesture in flight
#[derive(Debug)]
pub struct ToolBox {
    active: Box<dyn Tool>,
    style: DrawingStyle,
    dash_length: u32,
    view_offset: Vec2,
    gesture_active: bool,
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new(ToolKind::default(), DrawingStyle::default())
    }
}

impl ToolBox {
    pub fn new(kind: ToolKind, style: DrawingStyle) -> Self {
        Self {
            active: kind.instantiate(),
            style,
            dash_length: DEFAULT_DASH_LENGTH,
            view_offset: Vec2::ZERO,
            gesture_active: false,
        }
    }

    pub fn with_dash_length(mut self, dash_length: u32) -> Self {
        self.dash_length = dash_length;
        self
    }

    pub fn active(&self) -> &dyn Tool {
        self.active.as_ref()
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active.kind()
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut DrawingStyle {
        &mut self.style
    }

    pub fn view_offset(&self) -> Vec2 {
        self.view_offset
    }

    pub fn gesture_in_progress(&self) -> bool {
        self.gesture_active
    }

    /// Switch tools. A gesture still in progress is cancelled.
    pub fn select(&mut self, kind: ToolKind) {
        self.cancel_gesture();
        if self.active.kind() != kind {
            log::info!("Active tool: {}", kind.name());
            self.active = kind.instantiate();
        }
    }

    pub fn cancel_gesture(&mut self) {
        if self.gesture_active {
            log::debug!("cancelling {} gesture", self.active.name());
            self.active.cancel();
            self.gesture_active = false;
        }
    }

    /// Start a gesture on pointer-down.
    ///
    /// Returns true exactly once per gesture, and only for mutating tools:
    /// the caller must request a snapshot before any pixel changes.
    pub fn begin_gesture(&mut self) -> bool {
        if self.gesture_active {
            return false;
        }
        self.gesture_active = true;
        self.active.is_mutator()
    }

    /// Route one pointer event to the active tool.
    ///
    /// Drags and releases outside of a gesture are dropped.
    pub fn handle_pointer(
        &mut self,
        phase: PointerPhase,
        base: &mut RgbaImage,
        effects: &mut RgbaImage,
        pos: Pos2,
        outbox: &mut Outbox,
    ) {
        if !self.gesture_active {
            log::trace!("{:?} at {:?} outside of a gesture", phase, pos);
            return;
        }

        let mut ctx = ToolContext {
            base,
            effects,
            style: &self.style,
            dash_length: self.dash_length,
            view_offset: &mut self.view_offset,
            outbox,
        };
        match phase {
            PointerPhase::Down => self.active.on_pointer_down(&mut ctx, pos),
            PointerPhase::Dragged => self.active.on_pointer_dragged(&mut ctx, pos),
            PointerPhase::Up => {
                self.active.on_pointer_up(&mut ctx, pos);
                self.gesture_active = false;
            }
        }
    }
}
