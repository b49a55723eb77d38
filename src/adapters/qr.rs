use std::io::Cursor;

use error_stack::report;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::ports::qr_renderer::{QrRenderError, QrRenderer};

/// Smallest edge of the rendered image, in pixels.
const MIN_DIMENSION: u32 = 256;

#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrRenderer;

impl QrRenderer for PngQrRenderer {
    fn render_png(&self, payload: &str) -> error_stack::Result<Vec<u8>, QrRenderError> {
        render_png(payload)
    }
}

/// Renders `payload` as a PNG QR code at error correction level High.
pub fn render_png(payload: &str) -> error_stack::Result<Vec<u8>, QrRenderError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|error| report!(QrRenderError::Encode(error.to_string())))?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image)
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|error| report!(QrRenderError::Png(error.to_string())))?;

    Ok(png.into_inner())
}
