//! Preview downscaling.
//!
//! The estimator runs on the preview-sized frame, so the cap chosen here
//! affects the histogram statistics it sees.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::pixels::types::PixelBuffer;

/// Scale factor fitting `width x height` inside `max_dimension`, never upscaling.
pub fn preview_scale(width: usize, height: usize, max_dimension: usize) -> f64 {
    let scale_x = max_dimension as f64 / width as f64;
    let scale_y = max_dimension as f64 / height as f64;
    scale_x.min(scale_y).min(1.0)
}

/// Preview size for a source of `width x height`. Both sides are at least 1.
pub fn preview_dimensions(width: usize, height: usize, max_dimension: usize) -> (usize, usize) {
    let scale = preview_scale(width, height, max_dimension);
    let w = ((width as f64 * scale).round() as usize).max(1);
    let h = ((height as f64 * scale).round() as usize).max(1);
    (w, h)
}

impl PixelBuffer {
    /// Triangle-filter downscale so neither side exceeds `max_dimension`.
    /// Returns a clone when the buffer already fits.
    pub fn downscale_to_fit(&self, max_dimension: usize) -> Result<PixelBuffer> {
        let (dst_w, dst_h) = preview_dimensions(self.width(), self.height(), max_dimension);
        if dst_w == self.width() && dst_h == self.height() {
            return Ok(self.clone());
        }
        debug!(
            "Downscaling {}x{} -> {}x{} for preview",
            self.width(),
            self.height(),
            dst_w,
            dst_h
        );

        let too_large = || CorrectionError::InvalidDimensions(self.width(), self.height());
        let src_w = u32::try_from(self.width()).map_err(|_| too_large())?;
        let src_h = u32::try_from(self.height()).map_err(|_| too_large())?;
        let source = RgbaImage::from_raw(src_w, src_h, self.data().to_vec()).ok_or_else(|| {
            CorrectionError::InvalidInput("pixel data does not match RGBA8 dimensions".to_string())
        })?;

        // dst sides are bounded by the source sides, which fit in u32
        let resized = imageops::resize(&source, dst_w as u32, dst_h as u32, FilterType::Triangle);
        PixelBuffer::new(dst_w, dst_h, resized.into_raw())
    }
}
