use crate::correction_pipeline::common::error::Result;
use crate::correction_pipeline::estimator::histogram::ChannelInterval;
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::PixelBuffer;

/// Anything that turns one decoded frame into a base correction matrix.
pub trait MatrixEstimator {
    fn estimate(&self, pixels: &PixelBuffer) -> Result<ColorMatrix>;
}

/// Matrix plus the intermediate statistics it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    pub matrix: ColorMatrix,
    /// Average R, G, B over all pixels.
    pub average: [f64; 3],
    /// Hue rotation, in degrees, used for the shifted-red histogram.
    pub hue_shift: u32,
    /// True when the hue-shift search hit its iteration cap without reaching
    /// the target average red.
    pub saturated: bool,
    /// Normalization intervals for shifted red, green and blue.
    pub intervals: [ChannelInterval; 3],
}
