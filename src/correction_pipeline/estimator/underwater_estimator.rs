//! Underwater cast estimator.
//!
//! Lifts the attenuated red channel with a hue rotation, then stretches each
//! channel over the intensity range it actually uses.

use tracing::{debug, instrument, warn};

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::estimator::estimate::{Estimation, MatrixEstimator};
use crate::correction_pipeline::estimator::histogram::{ChannelHistograms, normalizing_interval};
use crate::correction_pipeline::estimator::hue_shift::{HueRotation, find_hue_shift};
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::{BYTES_PER_PIXEL, PixelBuffer};

/// Pixel count divided by this gives the histogram noise floor.
const THRESHOLD_RATIO: f64 = 2000.0;

/// Extra weight on blue inside the red row only.
const BLUE_MAGIC_VALUE: f64 = 1.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnderwaterEstimator;

impl UnderwaterEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimates the correction matrix and returns the statistics behind it.
    #[instrument(skip(self, pixels), fields(width = pixels.width(), height = pixels.height()))]
    pub fn estimate_detailed(&self, pixels: &PixelBuffer) -> Result<Estimation> {
        let pixel_count = pixels.pixel_count();
        if pixel_count == 0 {
            return Err(CorrectionError::InvalidInput(
                "cannot estimate a correction from an empty buffer".to_string(),
            ));
        }

        let average = average_color(pixels);
        let search = find_hue_shift(average);
        if search.saturated {
            warn!(
                avg_r = average[0],
                avg_g = average[1],
                avg_b = average[2],
                "Hue shift search saturated at {} degrees",
                search.degrees
            );
        }
        let rotation = HueRotation::new(search.degrees);

        let histograms = {
            let _span = tracing::debug_span!("build_histograms").entered();
            ChannelHistograms::build(pixels, rotation)
        };

        let threshold_level = pixel_count as f64 / THRESHOLD_RATIO;
        let intervals = [
            normalizing_interval(&histograms.red, threshold_level),
            normalizing_interval(&histograms.green, threshold_level),
            normalizing_interval(&histograms.blue, threshold_level),
        ];
        debug!(
            hue_shift = search.degrees,
            "Normalization intervals: r={:?} g={:?} b={:?}",
            intervals[0],
            intervals[1],
            intervals[2]
        );

        let (red_gain, red_offset) = intervals[0].gain_offset();
        let (green_gain, green_offset) = intervals[1].gain_offset();
        let (blue_gain, blue_offset) = intervals[2].gain_offset();

        let (shifted_r, shifted_g, shifted_b) = rotation.shift(1.0, 1.0, 1.0);

        let coefficients = [
            shifted_r * red_gain,
            shifted_g * red_gain,
            shifted_b * red_gain * BLUE_MAGIC_VALUE,
            0.0,
            red_offset,
            0.0,
            green_gain,
            0.0,
            0.0,
            green_offset,
            0.0,
            0.0,
            blue_gain,
            0.0,
            blue_offset,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
        ]
        .map(|c| c as f32);

        Ok(Estimation {
            matrix: ColorMatrix::new(coefficients)?,
            average,
            hue_shift: search.degrees,
            saturated: search.saturated,
            intervals,
        })
    }
}

impl MatrixEstimator for UnderwaterEstimator {
    fn estimate(&self, pixels: &PixelBuffer) -> Result<ColorMatrix> {
        self.estimate_detailed(pixels).map(|estimation| estimation.matrix)
    }
}

/// Unweighted mean of R, G and B; alpha is ignored.
fn average_color(pixels: &PixelBuffer) -> [f64; 3] {
    let mut sums = [0u64; 3];
    for px in pixels.data().chunks_exact(BYTES_PER_PIXEL) {
        sums[0] += px[0] as u64;
        sums[1] += px[1] as u64;
        sums[2] += px[2] as u64;
    }
    let count = pixels.pixel_count() as f64;
    sums.map(|s| s as f64 / count)
}
