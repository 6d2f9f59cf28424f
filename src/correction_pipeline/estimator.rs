//! Correction matrix estimation module
//!
//! Derives the underwater cast-removal matrix from raw pixel statistics:
//! a hue-shift search on the average color, per-channel histograms and a
//! noise-tolerant normalization interval for each channel.

mod estimate;
mod histogram;
mod hue_shift;
mod underwater_estimator;

#[cfg(test)]
mod tests;

pub use estimate::{Estimation, MatrixEstimator};
pub use histogram::{ChannelHistograms, ChannelInterval, normalizing_interval};
pub use hue_shift::{HueRotation, HueShiftSearch, MAX_HUE_SHIFT, MIN_AVG_RED, find_hue_shift};
pub use underwater_estimator::UnderwaterEstimator;
