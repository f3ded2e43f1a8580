use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;

/// Image clipboard collaborator used by copy and paste
pub trait Clipboard {
    fn set_image(&mut self, image: RgbaImage);
    fn image(&self) -> Option<RgbaImage>;
}

/// In-process clipboard keeping full transparency.
///
/// Clones share the same slot, so a handle can be kept outside the editor
/// (including on another thread) to inspect or seed the clipboard.
#[derive(Debug, Clone, Default)]
pub struct SharedClipboard {
    slot: Arc<Mutex<Option<RgbaImage>>>,
}

impl SharedClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl Clipboard for SharedClipboard {
    fn set_image(&mut self, image: RgbaImage) {
        *self.slot.lock() = Some(image);
    }

    fn image(&self) -> Option<RgbaImage> {
        self.slot.lock().clone()
    }
}
