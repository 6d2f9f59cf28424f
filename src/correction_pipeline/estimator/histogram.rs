//! Channel histograms and the normalization interval search.

use rayon::prelude::*;

use crate::correction_pipeline::estimator::hue_shift::HueRotation;
use crate::correction_pipeline::pixels::{BYTES_PER_PIXEL, PixelBuffer};

/// Pixel count above which histogram accumulation is split across threads.
const PARALLEL_THRESHOLD: usize = 1 << 18;

/// A bin counts as empty when `count - threshold_level` is below this.
const EMPTY_BIN_MARGIN: f64 = 2.0;

pub const BIN_COUNT: usize = 256;

/// 256-bin histograms of hue-shifted red, raw green and raw blue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistograms {
    pub red: [u64; BIN_COUNT],
    pub green: [u64; BIN_COUNT],
    pub blue: [u64; BIN_COUNT],
}

impl Default for ChannelHistograms {
    fn default() -> Self {
        Self {
            red: [0; BIN_COUNT],
            green: [0; BIN_COUNT],
            blue: [0; BIN_COUNT],
        }
    }
}

impl ChannelHistograms {
    pub fn build(pixels: &PixelBuffer, rotation: HueRotation) -> Self {
        let data = pixels.data();
        if pixels.pixel_count() >= PARALLEL_THRESHOLD {
            data.par_chunks_exact(BYTES_PER_PIXEL)
                .fold(Self::default, |mut acc, px| {
                    acc.add(px, rotation);
                    acc
                })
                .reduce(Self::default, Self::merge)
        } else {
            let mut acc = Self::default();
            for px in data.chunks_exact(BYTES_PER_PIXEL) {
                acc.add(px, rotation);
            }
            acc
        }
    }

    fn add(&mut self, px: &[u8], rotation: HueRotation) {
        let shifted = rotation.shifted_red(px[0] as f64, px[1] as f64, px[2] as f64);
        let red = shifted.clamp(0.0, 255.0).round() as usize;
        self.red[red] += 1;
        self.green[px[1] as usize] += 1;
        self.blue[px[2] as usize] += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        for i in 0..BIN_COUNT {
            self.red[i] += other.red[i];
            self.green[i] += other.green[i];
            self.blue[i] += other.blue[i];
        }
        self
    }
}

/// Used intensity range of one channel, as bin indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInterval {
    pub low: u8,
    pub high: u8,
}

impl ChannelInterval {
    /// `(gain, offset)` stretching the interval to the full range. The offset
    /// is in normalized units. A zero-width interval contributes nothing.
    pub fn gain_offset(&self) -> (f64, f64) {
        let width = self.high as f64 - self.low as f64;
        if width <= 0.0 {
            return (1.0, 0.0);
        }
        let gain = 256.0 / width;
        let offset = -(self.low as f64) / 256.0 * gain;
        (gain, offset)
    }
}

/// Widest run between near-empty bins of `histogram`.
///
/// Bin 0, every bin with `count - threshold_level < 2`, and bin 255 are
/// collected in order; the endpoints of the largest gap between consecutive
/// entries form the interval. Ties keep the first gap.
pub fn normalizing_interval(histogram: &[u64; BIN_COUNT], threshold_level: f64) -> ChannelInterval {
    let mut marks = Vec::with_capacity(BIN_COUNT + 2);
    marks.push(0u8);
    marks.extend(
        histogram
            .iter()
            .enumerate()
            .filter(|(_, count)| **count as f64 - threshold_level < EMPTY_BIN_MARGIN)
            .map(|(i, _)| i as u8),
    );
    marks.push(u8::MAX);

    let mut interval = ChannelInterval { low: 0, high: u8::MAX };
    let mut max_dist = 0u8;
    for pair in marks.windows(2) {
        let dist = pair[1] - pair[0];
        if dist > max_dist {
            max_dist = dist;
            interval = ChannelInterval {
                low: pair[0],
                high: pair[1],
            };
        }
    }
    interval
}
