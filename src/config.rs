use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CanvasError, CanvasResult};

/// Largest accepted canvas side. Keeps a worst-case flood fill interactive.
pub const MAX_CANVAS_SIDE: u32 = 1024;

pub const DEFAULT_CANVAS_SIDE: u32 = 500;

/// Fixed-at-construction canvas parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA
    pub background: [u8; 4],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIDE,
            height: DEFAULT_CANVAS_SIDE,
            background: [255, 255, 255, 255],
        }
    }
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32, background: Color32) -> CanvasResult<Self> {
        let config = Self {
            width,
            height,
            background: background.to_srgba_unmultiplied(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Checks that both sides are within `1..=MAX_CANVAS_SIDE`
    pub fn validate(&self) -> CanvasResult<()> {
        for (name, side) in [("width", self.width), ("height", self.height)] {
            if side == 0 || side > MAX_CANVAS_SIDE {
                return Err(CanvasError::InvalidConfig(format!(
                    "{} must be between 1 and {} (got {})",
                    name, MAX_CANVAS_SIDE, side
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!(
            "Loaded canvas config from {}: {}x{}",
            path.as_ref().display(),
            config.width,
            config.height
        );
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Attributes applied to the next stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Unmultiplied RGBA; also the fill color
    pub color: [u8; 4],
    pub width: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            width: 4.0,
        }
    }
}

impl BrushSettings {
    /// For the egui color picker; painting uses `color` as-is
    pub fn color32(&self) -> Color32 {
        let [r, g, b, a] = self.color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color.to_srgba_unmultiplied();
    }
}
