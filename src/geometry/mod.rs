mod pixel_rect;

pub use pixel_rect::{COORD_LIMIT, PixelRect};
