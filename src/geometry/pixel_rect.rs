use egui::{Pos2, Rect, Vec2};

/// Pixel coordinates are clamped to this magnitude, so edges computed from
/// an origin and an extent always fit in an `i64`.
pub const COORD_LIMIT: i64 = i32::MAX as i64;

/// Round a surface coordinate to a whole pixel within `±COORD_LIMIT`
fn round_coord(value: f32) -> i64 {
    if value.is_nan() {
        return 0;
    }
    (value.round() as i64).clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// An integer rectangle in surface pixel coordinates.
///
/// The origin may lie outside the surface (a dragged selection can hang off
/// an edge); the extent is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// A `width`×`height` rectangle with its top-left corner rounded from `origin`
    pub fn at(origin: Pos2, width: u32, height: u32) -> Self {
        Self::new(round_coord(origin.x), round_coord(origin.y), width, height)
    }

    /// Round a floating point rectangle to whole pixels.
    ///
    /// Returns `None` for zero, negative or non-finite extents.
    pub fn from_rect(rect: Rect) -> Option<Self> {
        let (w, h) = (rect.width(), rect.height());
        if !(w.is_finite() && h.is_finite() && rect.min.x.is_finite() && rect.min.y.is_finite()) {
            return None;
        }
        if w <= 0.0 || h <= 0.0 {
            return None;
        }

        let x0 = round_coord(rect.min.x);
        let y0 = round_coord(rect.min.y);
        let x1 = round_coord(rect.max.x);
        let y1 = round_coord(rect.max.y);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let width = u32::try_from(x1 - x0).ok()?;
        let height = u32::try_from(y1 - y0).ok()?;
        Some(Self::new(x0, y0, width, height))
    }

    pub fn right(&self) -> i64 {
        self.x.saturating_add(i64::from(self.width))
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(i64::from(self.height))
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not intersect
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let width = u32::try_from(x1 - x0).ok()?;
        let height = u32::try_from(y1 - y0).ok()?;
        Some(PixelRect::new(x0, y0, width, height))
    }

    /// Clip to a `width`×`height` surface anchored at the origin
    pub fn clip_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        self.intersect(&PixelRect::new(0, 0, width, height))
    }

    /// Shift by a fractional offset, rounding the resulting origin
    pub fn offset_by(&self, offset: Vec2) -> PixelRect {
        PixelRect::new(
            round_coord(self.x as f32 + offset.x),
            round_coord(self.y as f32 + offset.y),
            self.width,
            self.height,
        )
    }
}
