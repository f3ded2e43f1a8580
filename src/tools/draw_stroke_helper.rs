use egui::Pos2;
use image::RgbaImage;

use crate::raster::{self, Ink};

/// Helper for laying down a freehand stroke as the pointer moves.
///
/// Each new point is joined to the previous one, so fast pointer motion
/// still leaves a continuous line.
#[derive(Debug, Clone)]
pub struct DrawStrokeHelper {
    points: Vec<Pos2>,
    ink: Ink,
    width: u32,
}

impl DrawStrokeHelper {
    /// Create a new helper for stroke drawing
    pub fn new(ink: Ink, width: u32) -> Self {
        Self {
            points: Vec::new(),
            ink,
            width,
        }
    }

    /// Add a point to the stroke and rasterize the new segment onto `surface`
    pub fn add_point(&mut self, surface: &mut RgbaImage, point: Pos2) {
        match self.points.last() {
            Some(&last) => {
                // The start of the segment was already stamped with the previous point
                for p in raster::line_points(last, point).into_iter().skip(1) {
                    raster::stamp(surface, p, self.width, self.ink);
                }
            }
            None => raster::stamp(surface, point, self.width, self.ink),
        }
        self.points.push(point);
    }

    /// Get the current points
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}
