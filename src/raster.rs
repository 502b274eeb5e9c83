use egui::{Color32, ColorImage};
use image::{Rgba, RgbaImage};
use std::sync::Arc;

use crate::config::CanvasConfig;

/// Shared, immutable raster used as a snapshot background
pub type RasterRef = Arc<Raster>;

/// Fixed-size RGBA8 pixel grid, row-major, unmultiplied alpha
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

pub fn to_pixel(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

impl Raster {
    /// A raster filled with a single color
    pub fn filled(width: u32, height: u32, color: Color32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_pixel(color)),
        }
    }

    /// The blank canvas for a configuration
    pub fn blank(config: &CanvasConfig) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(config.width, config.height, Rgba(config.background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Bounds-checked sample; `None` outside the raster
    pub fn get(&self, x: i64, y: i64) -> Option<Rgba<u8>> {
        if self.contains(x, y) {
            Some(*self.pixels.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Bounds-checked write; returns false outside the raster
    pub fn set(&mut self, x: i64, y: i64, pixel: Rgba<u8>) -> bool {
        if self.contains(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, pixel);
            true
        } else {
            false
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Converts to an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

impl From<RgbaImage> for Raster {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}
