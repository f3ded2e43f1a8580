use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::clipboard::Clipboard;
use crate::geometry::PixelRect;
use crate::raster;

pub const DEFAULT_DASH_LENGTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Lifted from the base layer; the source region is left blank
    Cut,
    /// Pasted in; the base layer is untouched until commit
    Copy,
}

/// A lifted pixel buffer and where it currently sits
#[derive(Clone)]
pub struct SelectionState {
    buffer: RgbaImage,
    bounds: PixelRect,
    offset: Vec2,
    mode: SelectionMode,
}

impl std::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionState")
            .field("bounds", &self.bounds)
            .field("offset", &self.offset)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl SelectionState {
    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Where the buffer was taken from (or first placed), in base-layer pixels
    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Accumulated drag since the selection began
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Current position of the buffer: `bounds` shifted by `offset`
    pub fn placement(&self) -> PixelRect {
        self.bounds.offset_by(self.offset)
    }
}

/// Lifts, drags and commits at most one selection for a canvas.
///
/// While a selection is active the effects layer holds exactly one preview
/// of the buffer at its placement, framed by a dashed outline.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    active: Option<SelectionState>,
    dash_length: u32,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DASH_LENGTH)
    }
}

impl SelectionEngine {
    pub fn new(dash_length: u32) -> Self {
        Self {
            active: None,
            dash_length,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&SelectionState> {
        self.active.as_ref()
    }

    /// Round `bounds` to pixels and clip it to the canvas.
    /// `None` means there is nothing to select.
    pub fn resolve_bounds(bounds: Rect, canvas: &Canvas) -> Option<PixelRect> {
        PixelRect::from_rect(bounds)?.clip_to(canvas.width(), canvas.height())
    }

    /// Snapshot `region` of the base layer into a new CUT selection and blank
    /// it on the base layer. `region` must come from [`Self::resolve_bounds`].
    pub fn lift(&mut self, canvas: &mut Canvas, region: PixelRect) {
        let base = canvas.base_mut();
        let buffer = raster::crop(base, region);
        raster::clear_region(base, region);

        log::debug!("lifted {:?} from the base layer", region);
        self.active = Some(SelectionState {
            buffer,
            bounds: region,
            offset: Vec2::ZERO,
            mode: SelectionMode::Cut,
        });
        self.render_preview(canvas);
    }

    /// Place `image` as a COPY selection with its top-left corner at `at`.
    /// Returns false for an empty image.
    pub fn paste(&mut self, canvas: &mut Canvas, image: RgbaImage, at: Pos2) -> bool {
        if image.width() == 0 || image.height() == 0 {
            log::debug!("ignoring paste of an empty image");
            return false;
        }

        let bounds = PixelRect::at(at, image.width(), image.height());
        log::debug!("pasted {}x{} at {:?}", image.width(), image.height(), bounds);
        self.active = Some(SelectionState {
            buffer: image,
            bounds,
            offset: Vec2::ZERO,
            mode: SelectionMode::Copy,
        });
        self.render_preview(canvas);
        true
    }

    /// Drag the selection by `delta`. No-op while idle.
    pub fn move_by(&mut self, canvas: &mut Canvas, delta: Vec2) -> bool {
        let Some(selection) = self.active.as_mut() else {
            return false;
        };

        if selection.mode == SelectionMode::Cut {
            // Already blank since the lift; repeating keeps the source region clear
            raster::clear_region(canvas.base_mut(), selection.bounds);
        }
        selection.offset += delta;
        self.render_preview(canvas);
        true
    }

    /// Draw the buffer onto the base layer at its placement, wipe the
    /// preview and return to idle. Returns false if nothing was active.
    pub fn commit(&mut self, canvas: &mut Canvas) -> bool {
        let Some(selection) = self.active.take() else {
            return false;
        };

        let placement = selection.placement();
        let (base, effects) = canvas.surfaces_mut();
        raster::composite_over(base, &selection.buffer, placement.x, placement.y);
        raster::clear(effects);

        log::debug!("committed {:?} selection at {:?}", selection.mode, placement);
        true
    }

    /// Put a copy of the buffer on the clipboard
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> bool {
        match &self.active {
            Some(selection) => {
                clipboard.set_image(selection.buffer.clone());
                true
            }
            None => false,
        }
    }

    fn render_preview(&self, canvas: &mut Canvas) {
        let Some(selection) = &self.active else {
            return;
        };
        let placement = selection.placement();
        let effects = canvas.effects_mut();

        raster::clear(effects);
        image::imageops::replace(effects, &selection.buffer, placement.x, placement.y);
        raster::draw_dashed_rect(effects, placement, self.dash_length, raster::OUTLINE);
    }
}
