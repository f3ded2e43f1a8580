use egui::{Pos2, Rect};

use super::{Tool, ToolContext, ToolKind};
use crate::event::{SelectionCommitRequested, SelectionRequested};
use crate::geometry::PixelRect;
use crate::raster;

/// Rectangular marquee: drag out a region, release to lift it
#[derive(Debug, Default)]
pub struct MarqueeTool {
    start: Option<Pos2>,
}

impl MarqueeTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for MarqueeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Marquee
    }

    fn is_mutator(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        // A previous selection is put down before a new one is drawn
        ctx.outbox.post(SelectionCommitRequested);
        self.start = Some(pos);
    }

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        let Some(start) = self.start else {
            return;
        };
        raster::clear(ctx.effects);
        if let Some(marquee) = PixelRect::from_rect(Rect::from_two_pos(start, pos)) {
            raster::draw_dashed_rect(ctx.effects, marquee, ctx.dash_length, raster::OUTLINE);
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        let Some(start) = self.start.take() else {
            return;
        };
        raster::clear(ctx.effects);
        ctx.outbox.post(SelectionRequested {
            bounds: Rect::from_two_pos(start, pos),
        });
    }

    fn cancel(&mut self) {
        self.start = None;
    }
}
