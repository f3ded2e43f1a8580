use egui::Pos2;

use super::{Tool, ToolContext, ToolKind};
use crate::event::SelectionMoved;

/// Drags the active selection; leaves the surfaces to the selection engine
#[derive(Debug, Default)]
pub struct MoveTool {
    last: Option<Pos2>,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn drag_to(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        let Some(last) = self.last else {
            return;
        };
        let delta = pos - last;
        if delta != egui::Vec2::ZERO {
            ctx.outbox.post(SelectionMoved {
                dx: delta.x,
                dy: delta.y,
            });
        }
        self.last = Some(pos);
    }
}

impl Tool for MoveTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Move
    }

    fn is_mutator(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.last = Some(pos);
    }

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.drag_to(ctx, pos);
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.drag_to(ctx, pos);
        self.last = None;
    }

    fn cancel(&mut self) {
        self.last = None;
    }
}
