//! Pixel buffer types

use crate::correction_pipeline::common::error::{CorrectionError, Result};

pub const BYTES_PER_PIXEL: usize = 4;

/// Decoded RGBA8 frame, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Output of the exporter, ready for an encoder.
pub type ImageBuffer = PixelBuffer;

impl PixelBuffer {
    /// Wraps interleaved RGBA8 data. Zero-area buffers and length mismatches
    /// are rejected.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CorrectionError::InvalidDimensions(width, height));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(CorrectionError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(CorrectionError::InvalidInput(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Expands interleaved RGB8 data to opaque RGBA8.
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Result<Self> {
        if rgb.len() != width.saturating_mul(height).saturating_mul(3) {
            return Err(CorrectionError::InvalidInput(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                width.saturating_mul(height).saturating_mul(3),
                width,
                height,
                rgb.len()
            )));
        }
        let data = rgb
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect();
        Self::new(width, height, data)
    }

    /// Buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        let count = width.saturating_mul(height);
        let data = rgba.iter().copied().cycle().take(count.saturating_mul(BYTES_PER_PIXEL)).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * BYTES_PER_PIXEL;
        &self.data[y * stride..(y + 1) * stride]
    }
}

/// Kind of media a session was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

const SUPPORTED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/tiff"];
const SUPPORTED_VIDEO_TYPES: [&str; 1] = ["video/mp4"];

impl MediaKind {
    pub fn from_mime_type(mime: &str) -> Result<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if SUPPORTED_PHOTO_TYPES.contains(&mime.as_str()) {
            Ok(MediaKind::Photo)
        } else if SUPPORTED_VIDEO_TYPES.contains(&mime.as_str()) {
            Ok(MediaKind::Video)
        } else {
            Err(CorrectionError::UnsupportedMediaKind(mime))
        }
    }
}
