use egui::Color32;
use serde::{Deserialize, Serialize};

/// Colour and width shared by every tool in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingStyle {
    pub color: Color32,
    pub width: u32,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 1,
        }
    }
}

impl DrawingStyle {
    pub fn new(color: Color32, width: u32) -> Self {
        Self { color, width }
    }
}
