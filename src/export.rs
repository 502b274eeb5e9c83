use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs;
use std::path::Path;

use crate::error::CanvasResult;
use crate::raster::Raster;

pub const PNG_MIME: &str = "image/png";

/// A self-contained encoded image, ready to transmit or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl ExportedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        PNG_MIME
    }

    /// `data:image/png;base64,...`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", PNG_MIME, STANDARD.encode(&self.bytes))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        fs::write(path.as_ref(), &self.bytes)?;
        log::info!("Saved drawing to {}", path.as_ref().display());
        Ok(())
    }
}

/// Losslessly encodes the raster as PNG, at its full size
pub fn encode_png(raster: &Raster) -> CanvasResult<ExportedImage> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    encoder.write_image(
        raster.as_raw(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgba8,
    )?;

    log::debug!(
        "Encoded {}x{} drawing as {} bytes of PNG",
        raster.width(),
        raster.height(),
        bytes.len()
    );
    Ok(ExportedImage {
        bytes,
        width: raster.width(),
        height: raster.height(),
    })
}
