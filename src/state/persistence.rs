use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::DEFAULT_DASH_LENGTH;
use crate::style::DrawingStyle;

/// Errors that can occur while loading or saving editor configuration
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to (de)serialize config: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Session-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    /// Size of workspaces created without an explicit size
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fill of every new background layer
    pub background: Color32,
    /// Undo depth per workspace; `None` keeps every snapshot
    pub history_limit: Option<usize>,
    /// Initial colour and width shared by the tools
    pub style: DrawingStyle,
    /// Dash length of the selection outline, in pixels
    pub dash_length: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color32::WHITE,
            history_limit: None,
            style: DrawingStyle::default(),
            dash_length: DEFAULT_DASH_LENGTH,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn validate(&self) -> PersistenceResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PersistenceError::InvalidConfig(format!(
                "canvas size {}x{} is not positive",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.style.width == 0 {
            return Err(PersistenceError::InvalidConfig("style width must be positive".into()));
        }
        if self.history_limit == Some(0) {
            return Err(PersistenceError::InvalidConfig("history limit must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = EditorConfig::from_json(r#"{ "canvas_width": 320, "history_limit": 20 }"#).unwrap();
        assert_eq!(config.canvas_width, 320);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.style, DrawingStyle::default());
    }

    #[test]
    fn test_zero_canvas_is_rejected() {
        let err = EditorConfig::from_json(r#"{ "canvas_height": 0 }"#).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_style() {
        let mut config = EditorConfig::default();
        config.style = DrawingStyle::new(Color32::from_rgb(10, 20, 30), 7);
        let restored = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }
}
