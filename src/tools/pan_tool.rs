use egui::Pos2;

use super::{Tool, ToolContext, ToolKind};

#[derive(Debug, Default)]
pub struct PanTool {
    last: Option<Pos2>,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PanTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pan
    }

    fn is_mutator(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.last = Some(pos);
    }

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        if let Some(last) = self.last.replace(pos) {
            *ctx.view_offset += pos - last;
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.on_pointer_dragged(ctx, pos);
        self.last = None;
    }

    fn cancel(&mut self) {
        self.last = None;
    }
}
