//! Pixel-level helpers over straight-alpha RGBA surfaces.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage, imageops};

use crate::geometry::{COORD_LIMIT, PixelRect};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Colour used for the selection outline
pub const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// What a brush leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// Composite the colour over the existing pixel
    Paint(Rgba<u8>),
    /// Reset the pixel to fully transparent
    Erase,
}

pub fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

pub fn clear(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        *pixel = TRANSPARENT;
    }
}

pub fn fill(image: &mut RgbaImage, color: Rgba<u8>) {
    for pixel in image.pixels_mut() {
        *pixel = color;
    }
}

pub fn clear_region(image: &mut RgbaImage, region: PixelRect) {
    let Some(region) = region.clip_to(image.width(), image.height()) else {
        return;
    };
    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            image.put_pixel(x as u32, y as u32, TRANSPARENT);
        }
    }
}

/// Copy of the pixels under `region`, which must lie inside the surface
pub fn crop(image: &RgbaImage, region: PixelRect) -> RgbaImage {
    imageops::crop_imm(image, region.x as u32, region.y as u32, region.width, region.height).to_image()
}

/// Source-over of `src` onto `dst`.
///
/// A transparent destination takes the source pixel verbatim, and an
/// opaque or transparent source short-circuits, so lifting and re-placing
/// pixels is lossless.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src[3]);
    let da = u32::from(dst[3]);
    if sa == 255 || da == 0 {
        *dst = src;
        return;
    }
    if sa == 0 {
        return;
    }

    // Scaled by 255 to stay in integers
    let dst_weight = da * (255 - sa);
    let out_a = sa * 255 + dst_weight;
    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = u32::from(src[c]) * sa * 255 + u32::from(dst[c]) * dst_weight;
        out[c] = ((value + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    *dst = Rgba(out);
}

/// Composite `src` over `dst` with `src`'s top-left corner at (x, y).
/// Parts falling outside `dst` are dropped.
pub fn composite_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let placed = PixelRect::new(x, y, src.width(), src.height());
    let Some(visible) = placed.clip_to(dst.width(), dst.height()) else {
        return;
    };
    for dy in visible.y..visible.bottom() {
        for dx in visible.x..visible.right() {
            let source = *src.get_pixel((dx - x) as u32, (dy - y) as u32);
            blend_pixel(dst.get_pixel_mut(dx as u32, dy as u32), source);
        }
    }
}

fn apply_ink(image: &mut RgbaImage, x: i64, y: i64, ink: Ink) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    match ink {
        Ink::Paint(color) => blend_pixel(pixel, color),
        Ink::Erase => *pixel = TRANSPARENT,
    }
}

/// Square brush of side `width` centred on `center`
pub fn stamp(image: &mut RgbaImage, center: Pos2, width: u32, ink: Ink) {
    let width = i64::from(width.max(1));
    let x0 = (center.x.floor() as i64).clamp(-COORD_LIMIT, COORD_LIMIT) - (width - 1) / 2;
    let y0 = (center.y.floor() as i64).clamp(-COORD_LIMIT, COORD_LIMIT) - (width - 1) / 2;
    for y in y0..y0 + width {
        for x in x0..x0 + width {
            apply_ink(image, x, y, ink);
        }
    }
}

/// Points from `from` to `to`, one per distinct pixel, both ends included
pub fn line_points(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let delta = to - from;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;
    let mut points = Vec::with_capacity(steps as usize + 1);
    // Stamping the same pixel twice would double-blend translucent ink
    let mut last: Option<(i64, i64)> = None;
    for i in 0..=steps {
        let point = from + delta * (i as f32 / steps as f32);
        let key = (point.x.floor() as i64, point.y.floor() as i64);
        if last == Some(key) {
            continue;
        }
        last = Some(key);
        points.push(point);
    }
    points
}

pub fn draw_line(image: &mut RgbaImage, from: Pos2, to: Pos2, width: u32, ink: Ink) {
    for point in line_points(from, to) {
        stamp(image, point, width, ink);
    }
}

/// Outline of the rectangle spanned by two corner points
pub fn draw_rect_outline(image: &mut RgbaImage, a: Pos2, b: Pos2, width: u32, ink: Ink) {
    let min = a.min(b);
    let max = a.max(b);
    let corners = [
        min,
        Pos2::new(max.x, min.y),
        max,
        Pos2::new(min.x, max.y),
    ];
    for i in 0..corners.len() {
        draw_line(image, corners[i], corners[(i + 1) % corners.len()], width, ink);
    }
}

/// One-pixel dashed border along the inside edge of `rect`
pub fn draw_dashed_rect(image: &mut RgbaImage, rect: PixelRect, dash: u32, color: Rgba<u8>) {
    if rect.clip_to(image.width(), image.height()).is_none() {
        return;
    }
    let dash = u64::from(dash.max(1));
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

    let mut perimeter: Vec<(i64, i64)> = Vec::new();
    perimeter.extend((left..=right).map(|x| (x, top)));
    perimeter.extend((top + 1..=bottom).map(|y| (right, y)));
    if bottom > top {
        perimeter.extend((left..right).rev().map(|x| (x, bottom)));
    }
    if right > left {
        perimeter.extend((top + 1..bottom).rev().map(|y| (left, y)));
    }

    for (i, (x, y)) in perimeter.into_iter().enumerate() {
        if (i as u64 / dash) % 2 == 0
            && x >= 0
            && y >= 0
            && x < i64::from(image.width())
            && y < i64::from(image.height())
        {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_onto_transparent_is_exact() {
        let mut dst = TRANSPARENT;
        let src = Rgba([12, 34, 56, 78]);
        blend_pixel(&mut dst, src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend_pixel(&mut dst, Rgba([255, 255, 255, 128]));
        assert_eq!(dst[3], 255);
        assert!((127..=129).contains(&dst[0]));
    }

    #[test]
    fn test_composite_clips_to_destination() {
        let mut dst = RgbaImage::new(4, 4);
        let src = RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255]));
        composite_over(&mut dst, &src, -2, 2);

        assert_eq!(*dst.get_pixel(0, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(0, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(1, 2), TRANSPARENT);
        assert_eq!(*dst.get_pixel(0, 1), TRANSPARENT);
    }

    #[test]
    fn test_stamp_width_one_hits_single_pixel() {
        let mut image = RgbaImage::new(5, 5);
        stamp(&mut image, Pos2::new(2.4, 3.9), 1, Ink::Paint(OUTLINE));
        let painted: Vec<_> = image.enumerate_pixels().filter(|(_, _, p)| p[3] > 0).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(painted, vec![(2, 3)]);
    }

    #[test]
    fn test_dashed_rect_leaves_interior_untouched() {
        let mut image = RgbaImage::new(10, 10);
        draw_dashed_rect(&mut image, PixelRect::new(1, 1, 8, 8), 2, OUTLINE);

        assert_eq!(*image.get_pixel(1, 1), OUTLINE);
        assert_eq!(*image.get_pixel(2, 1), OUTLINE);
        assert_eq!(*image.get_pixel(3, 1), TRANSPARENT);
        assert_eq!(*image.get_pixel(4, 4), TRANSPARENT);
        assert_eq!(*image.get_pixel(0, 0), TRANSPARENT);
    }
}
