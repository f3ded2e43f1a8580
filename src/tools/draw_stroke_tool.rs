use egui::Pos2;

use super::{DrawStrokeHelper, Tool, ToolContext, ToolKind};
use crate::raster::{self, Ink};

/// Freehand drawing straight onto the base layer: pencil or eraser
#[derive(Debug)]
pub struct DrawStrokeTool {
    kind: ToolKind,
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<DrawStrokeHelper>,
}

impl DrawStrokeTool {
    pub fn pencil() -> Self {
        Self {
            kind: ToolKind::Pencil,
            current_stroke: None,
        }
    }

    pub fn eraser() -> Self {
        Self {
            kind: ToolKind::Eraser,
            current_stroke: None,
        }
    }

    fn ink(&self, ctx: &ToolContext<'_>) -> Ink {
        match self.kind {
            ToolKind::Eraser => Ink::Erase,
            _ => Ink::Paint(raster::to_rgba(ctx.style.color)),
        }
    }
}

impl Tool for DrawStrokeTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn supports_color(&self) -> bool {
        self.kind == ToolKind::Pencil
    }

    fn supports_width(&self) -> bool {
        true
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        // Start a new stroke at the cursor position
        let mut stroke = DrawStrokeHelper::new(self.ink(ctx), ctx.style.width);
        stroke.add_point(ctx.base, pos);
        self.current_stroke = Some(stroke);
    }

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(ctx.base, pos);
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        if let Some(mut stroke) = self.current_stroke.take() {
            if stroke.points().last() != Some(&pos) {
                stroke.add_point(ctx.base, pos);
            }
        }
    }

    fn cancel(&mut self) {
        self.current_stroke = None;
    }
}
