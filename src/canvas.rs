use egui::Color32;
use image::{RgbaImage, imageops};
use thiserror::Error;

use crate::layer::{Layer, LayerId, LayerKind};
use crate::raster;

/// The base layer always sits directly above the background
const BASE_INDEX: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unsupported rotation of {0} degrees, expected 0, 90, 180 or 270")]
    UnsupportedAngle(u32),

    #[error("the {0:?} layer cannot be removed")]
    ProtectedLayer(LayerKind),

    #[error("no layer with id {0}")]
    LayerNotFound(LayerId),
}

/// An ordered stack of equally sized surfaces, bottom first:
/// background, base, user layers, effects.
#[derive(Debug, Clone)]
pub struct Canvas {
    layers: Vec<Layer>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Build the mandatory background, base and effects surfaces
    pub fn new(width: u32, height: u32, background: Color32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let mut backdrop = Layer::new("Background", LayerKind::Background, width, height);
        raster::fill(&mut backdrop.pixels, raster::to_rgba(background));

        Ok(Self {
            layers: vec![
                backdrop,
                Layer::new("Base", LayerKind::Base, width, height),
                Layer::new("Effects", LayerKind::Effects, width, height),
            ],
            width,
            height,
        })
    }

    /// A canvas sized to `image`, with `image` installed as the base layer
    pub fn from_image(image: RgbaImage, background: Color32) -> Result<Self, CanvasError> {
        let mut canvas = Self::new(image.width(), image.height(), background)?;
        canvas.layers[BASE_INDEX].pixels = image;
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    fn effects_index(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn base(&self) -> &RgbaImage {
        &self.layers[BASE_INDEX].pixels
    }

    pub fn base_mut(&mut self) -> &mut RgbaImage {
        &mut self.layers[BASE_INDEX].pixels
    }

    pub fn effects(&self) -> &RgbaImage {
        &self.layers[self.effects_index()].pixels
    }

    pub fn effects_mut(&mut self) -> &mut RgbaImage {
        let index = self.effects_index();
        &mut self.layers[index].pixels
    }

    /// Simultaneous mutable access to the base and effects surfaces
    pub fn surfaces_mut(&mut self) -> (&mut RgbaImage, &mut RgbaImage) {
        let effects = self.effects_index();
        let (lower, upper) = self.layers.split_at_mut(effects);
        (&mut lower[BASE_INDEX].pixels, &mut upper[0].pixels)
    }

    pub fn user_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.kind == LayerKind::User)
    }

    /// Insert a blank layer directly below the effects layer, above every
    /// existing user layer
    pub fn add_user_layer(&mut self, name: &str) -> LayerId {
        let layer = Layer::new(name, LayerKind::User, self.width, self.height);
        let id = layer.id;
        let index = self.effects_index();
        self.layers.insert(index, layer);
        log::debug!("added user layer {} at index {}", id, index);
        id
    }

    pub fn remove_user_layer(&mut self, id: LayerId) -> Result<Layer, CanvasError> {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or(CanvasError::LayerNotFound(id))?;

        let kind = self.layers[index].kind;
        if kind.is_protected() {
            return Err(CanvasError::ProtectedLayer(kind));
        }
        log::debug!("removed user layer {}", id);
        Ok(self.layers.remove(index))
    }

    /// Rotate every layer clockwise by `degrees`, then mirror it.
    ///
    /// Transparency is carried through untouched. Quarter turns swap the
    /// canvas width and height.
    pub fn rotate_and_mirror(&mut self, degrees: u32, mirror_x: bool, mirror_y: bool) -> Result<(), CanvasError> {
        if !matches!(degrees, 0 | 90 | 180 | 270) {
            return Err(CanvasError::UnsupportedAngle(degrees));
        }

        for layer in &mut self.layers {
            match degrees {
                90 => layer.pixels = imageops::rotate90(&layer.pixels),
                180 => imageops::rotate180_in_place(&mut layer.pixels),
                270 => layer.pixels = imageops::rotate270(&layer.pixels),
                _ => {}
            }
            if mirror_x {
                imageops::flip_horizontal_in_place(&mut layer.pixels);
            }
            if mirror_y {
                imageops::flip_vertical_in_place(&mut layer.pixels);
            }
        }

        if degrees == 90 || degrees == 270 {
            std::mem::swap(&mut self.width, &mut self.height);
        }
        Ok(())
    }
}
