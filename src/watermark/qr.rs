//! QR rendering and detection backends.

use crate::config::QrConfig;
use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use rqrr::PreparedImage;
use std::io::Cursor;
use tracing::debug;

/// Trait for the QR capability the watermark needs.
///
/// Implementations turn text into an encoded image and back.
pub trait QrBackend: Send + Sync {
    /// Render `text` as an encoded QR image.
    fn render(&self, text: &str) -> Result<Vec<u8>>;

    /// Decode the first QR code found in an encoded image.
    ///
    /// Returns `None` when the bytes are not an image, no code is found,
    /// or the code fails to decode.
    fn detect(&self, image: &[u8]) -> Option<String>;
}

/// PNG rendering with `qrcode`, detection with `rqrr`.
#[derive(Debug, Clone, Default)]
pub struct PngQrBackend {
    config: QrConfig,
}

impl PngQrBackend {
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }
}

impl QrBackend for PngQrBackend {
    fn render(&self, text: &str) -> Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(text, self.config.ec_level.into())
            .map_err(|e| Error::Qr(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(self.config.quiet_zone)
            .module_dimensions(self.config.module_size, self.config.module_size)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::Qr(e.to_string()))?;

        Ok(png)
    }

    fn detect(&self, image: &[u8]) -> Option<String> {
        let gray = match image::load_from_memory(image) {
            Ok(decoded) => decoded.to_luma8(),
            Err(e) => {
                debug!(error = %e, "watermark image could not be decoded");
                return None;
            }
        };

        let (width, height) = gray.dimensions();
        let mut prepared = PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| gray.get_pixel(x as u32, y as u32)[0],
        );

        let grids = prepared.detect_grids();
        let grid = grids.first()?;

        match grid.decode() {
            Ok((_, content)) => Some(content),
            Err(e) => {
                debug!(error = ?e, "QR grid found but failed to decode");
                None
            }
        }
    }
}
