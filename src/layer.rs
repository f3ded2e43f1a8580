use std::fmt;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a surface plays in the canvas stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// Bottom-most fill, never removable
    Background,
    /// Committed drawing content; the only layer history tracks
    Base,
    /// Optional layers added between base and effects
    User,
    /// Top-most scratch surface for previews, never removable
    Effects,
}

impl LayerKind {
    /// Whether user layer operations may remove this layer
    pub fn is_protected(self) -> bool {
        !matches!(self, LayerKind::User)
    }
}

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single raster surface in the canvas stack
#[derive(Clone, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: LayerId,
    /// Display name of the layer
    pub name: String,
    pub kind: LayerKind,
    /// Whether the layer is currently visible
    pub visible: bool,
    pub pixels: RgbaImage,
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visible", &self.visible)
            .field("size", &self.pixels.dimensions())
            .finish()
    }
}

impl Layer {
    /// A fully transparent layer
    pub fn new(name: &str, kind: LayerKind, width: u32, height: u32) -> Self {
        Self::with_pixels(name, kind, RgbaImage::new(width, height))
    }

    pub fn with_pixels(name: &str, kind: LayerKind, pixels: RgbaImage) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            kind,
            visible: true,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
