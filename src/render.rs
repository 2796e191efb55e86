//! Rasterizing QR symbols into grayscale images and PNG bytes.
//!
//! Symbol encoding is delegated to the [`qrcode`] crate. This module only
//! decides how the module grid maps onto pixels: a fixed quiet zone, black on
//! white, and an output of exactly the requested pixel size.

use std::io::Cursor;

use image::{GrayImage, ImageBuffer, ImageFormat, Luma};
use qrcode::types::Color;
use qrcode::{EcLevel, QrCode};

use crate::error::RenderError;
use crate::params::ENDPOINT_SIZE;

/// Error correction is fixed at the medium tier.
pub const ERROR_CORRECTION: EcLevel = EcLevel::M;

/// Quiet zone used by the interactive preview, in modules.
pub const PREVIEW_MARGIN: u32 = 4;

/// Quiet zone used by the image endpoint, in modules.
pub const ENDPOINT_MARGIN: u32 = 2;

/// Largest edge, in pixels, a request may ask for.
pub const MAX_PIXEL_SIZE: u32 = ENDPOINT_SIZE.max;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// What to render: a payload at a pixel size with a quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    payload: String,
    pixel_size: u32,
    margin: u32,
}

impl QrRequest {
    /// Builds a request, rejecting payloads that are empty after trimming.
    ///
    /// The payload itself is kept as given; callers decide whether to trim.
    /// `pixel_size` is clamped to `1..=MAX_PIXEL_SIZE`.
    pub fn new(payload: impl Into<String>, pixel_size: u32) -> Result<Self, RenderError> {
        let payload = payload.into();
        if payload.trim().is_empty() {
            return Err(RenderError::EmptyPayload);
        }
        Ok(Self {
            payload,
            pixel_size: pixel_size.clamp(1, MAX_PIXEL_SIZE),
            margin: PREVIEW_MARGIN,
        })
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }
}

/// The module grid of an encoded symbol.
struct Symbol {
    width: i64,
    dark: Vec<bool>,
}

impl Symbol {
    fn encode(payload: &str) -> Result<Self, RenderError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ERROR_CORRECTION)?;
        let width = code.width() as i64;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(Self { width, dark })
    }

    /// Returns false for coordinates outside the grid, so the quiet zone falls out naturally.
    fn get_module(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.width {
            return false;
        }
        self.dark[(y * self.width + x) as usize]
    }
}

/// A rasterized QR symbol, owned transiently by whoever asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    buffer: GrayImage,
}

impl RenderedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    pub fn as_luma(&self) -> &GrayImage {
        &self.buffer
    }

    /// Encodes the image as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.buffer
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Rasterizes `request` into an image of exactly `pixel_size × pixel_size`.
///
/// Modules are drawn at a whole number of pixels each, the largest that still
/// leaves `margin` modules of quiet zone. The symbol is centred and the
/// leftover pixels widen the quiet zone. When even one pixel per module does
/// not fit, the quiet zone is cropped first.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] when the payload does not fit in a symbol.
///
/// # Example
///
/// ```
/// use qrstudio::render::{render, QrRequest};
///
/// let request = QrRequest::new("https://base.org", 280).unwrap();
/// let img = render(&request).unwrap();
/// assert_eq!(img.dimensions(), (280, 280));
/// ```
pub fn render(request: &QrRequest) -> Result<RenderedImage, RenderError> {
    let symbol = Symbol::encode(&request.payload)?;
    let size = request.pixel_size;
    let modules = symbol.width + 2 * request.margin as i64;
    let scale = (size as i64 / modules).max(1);
    let offset = (size as i64 - symbol.width * scale) / 2;

    let mut img: GrayImage = ImageBuffer::new(size, size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x as i64 - offset).div_euclid(scale);
        let qr_y = (y as i64 - offset).div_euclid(scale);
        *pixel = if symbol.get_module(qr_x, qr_y) { DARK } else { LIGHT };
    }

    Ok(RenderedImage { buffer: img })
}

/// Renders straight to PNG bytes.
pub fn render_png(request: &QrRequest) -> Result<Vec<u8>, RenderError> {
    render(request)?.to_png()
}

/// Draws the symbol for `payload` with block characters, two per module.
pub fn to_terminal_string(payload: &str) -> Result<String, RenderError> {
    let symbol = Symbol::encode(payload)?;
    let border = PREVIEW_MARGIN as i64;
    let mut out = String::new();
    for y in -border..symbol.width + border {
        for x in -border..symbol.width + border {
            let c = if symbol.get_module(x, y) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    Ok(out)
}
