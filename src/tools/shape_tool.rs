use egui::Pos2;
use image::RgbaImage;

use super::{Tool, ToolContext, ToolKind};
use crate::raster::{self, Ink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Line,
    Rectangle,
}

/// Drag-to-size shapes: previewed on the effects layer, rasterized onto the
/// base layer on release
#[derive(Debug)]
pub struct ShapeTool {
    shape: Shape,
    start: Option<Pos2>,
}

impl ShapeTool {
    pub fn line() -> Self {
        Self {
            shape: Shape::Line,
            start: None,
        }
    }

    pub fn rectangle() -> Self {
        Self {
            shape: Shape::Rectangle,
            start: None,
        }
    }

    fn draw(&self, surface: &mut RgbaImage, from: Pos2, to: Pos2, width: u32, ink: Ink) {
        match self.shape {
            Shape::Line => raster::draw_line(surface, from, to, width, ink),
            Shape::Rectangle => raster::draw_rect_outline(surface, from, to, width, ink),
        }
    }
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        match self.shape {
            Shape::Line => ToolKind::Line,
            Shape::Rectangle => ToolKind::Rectangle,
        }
    }

    fn supports_color(&self) -> bool {
        true
    }

    fn supports_width(&self) -> bool {
        true
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, pos: Pos2) {
        self.start = Some(pos);
    }

    fn on_pointer_dragged(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        let Some(start) = self.start else {
            return;
        };
        let ink = Ink::Paint(raster::to_rgba(ctx.style.color));
        raster::clear(ctx.effects);
        self.draw(ctx.effects, start, pos, ctx.style.width, ink);
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Pos2) {
        let Some(start) = self.start.take() else {
            return;
        };
        let ink = Ink::Paint(raster::to_rgba(ctx.style.color));
        raster::clear(ctx.effects);
        self.draw(ctx.base, start, pos, ctx.style.width, ink);
    }

    fn cancel(&mut self) {
        self.start = None;
    }
}
