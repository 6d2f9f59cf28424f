use crate::correction_pipeline::estimator::{
    ChannelHistograms, ChannelInterval, HueRotation, MAX_HUE_SHIFT, MatrixEstimator,
    UnderwaterEstimator, find_hue_shift, normalizing_interval,
};
use crate::correction_pipeline::pixels::PixelBuffer;

fn gray_ramp(height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(256 * height * 4);
    for _ in 0..height {
        for x in 0..256 {
            let v = x as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    PixelBuffer::new(256, height, data).unwrap()
}

/// Blue-green scene: weak red, strong green/blue, with some spread.
fn underwater_scene(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = (10 + (x * 30) / width) as u8;
            let g = (90 + (y * 80) / height) as u8;
            let b = (120 + ((x + y) * 100) / (width + height)) as u8;
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

#[test]
fn test_uniform_buffers_produce_finite_matrices() {
    let estimator = UnderwaterEstimator::new();
    for rgba in [
        [0, 0, 0, 255],
        [255, 255, 255, 255],
        [0, 0, 255, 255],
        [0, 255, 0, 255],
        [30, 120, 140, 255],
        [128, 128, 128, 0],
    ] {
        let pixels = PixelBuffer::filled(37, 23, rgba).unwrap();
        let matrix = estimator.estimate(&pixels).unwrap();
        assert!(matrix.is_finite(), "non-finite matrix for {:?}", rgba);
    }
}

#[test]
fn test_pure_blue_boosts_red() {
    let pixels = PixelBuffer::filled(100, 100, [0, 0, 255, 255]).unwrap();
    let estimation = UnderwaterEstimator::new().estimate_detailed(&pixels).unwrap();

    assert!(estimation.saturated);
    assert_eq!(estimation.hue_shift, MAX_HUE_SHIFT + 1);

    let matrix = estimation.matrix;
    assert!(matrix.get(2, 2).is_finite());
    let red_row = matrix.row(0);
    assert!(red_row[0] != 0.0);
    assert!(red_row[1] != 0.0);
    assert!(red_row[2] != 0.0);
}

#[test]
fn test_full_range_ramp_is_nearly_identity() {
    let estimation = UnderwaterEstimator::new()
        .estimate_detailed(&gray_ramp(40))
        .unwrap();

    assert_eq!(estimation.hue_shift, 0);
    assert!(!estimation.saturated);
    for interval in estimation.intervals {
        assert_eq!(interval, ChannelInterval { low: 0, high: 255 });
    }

    let m = estimation.matrix;
    let expected_gain = 256.0f32 / 255.0;
    assert!((m.get(0, 0) - expected_gain).abs() < 1e-5);
    assert!(m.get(0, 1).abs() < 1e-5);
    assert!(m.get(0, 2).abs() < 1e-5);
    assert!((m.get(1, 1) - expected_gain).abs() < 1e-5);
    assert!((m.get(2, 2) - expected_gain).abs() < 1e-5);
    assert_eq!(m.get(1, 4), 0.0);
    assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_underwater_scene_shifts_hue() {
    let estimation = UnderwaterEstimator::new()
        .estimate_detailed(&underwater_scene(120, 80))
        .unwrap();

    assert!(estimation.average[0] < 60.0);
    assert!(estimation.hue_shift > 0);
    assert!(estimation.matrix.is_finite());
    // Blue weight inside the red row carries the 1.2 boost over the rotation.
    let rotation = HueRotation::new(estimation.hue_shift);
    let (_, _, shifted_b) = rotation.shift(1.0, 1.0, 1.0);
    let (red_gain, _) = estimation.intervals[0].gain_offset();
    let expected = (shifted_b * red_gain * 1.2) as f32;
    assert!((estimation.matrix.get(0, 2) - expected).abs() < 1e-4);
}

#[test]
fn test_estimate_is_deterministic() {
    let pixels = underwater_scene(64, 48);
    let estimator = UnderwaterEstimator::new();
    assert_eq!(
        estimator.estimate(&pixels).unwrap(),
        estimator.estimate(&pixels).unwrap()
    );
}

#[test]
fn test_hue_shift_skipped_when_red_is_bright() {
    let search = find_hue_shift([80.0, 10.0, 10.0]);
    assert_eq!(search.degrees, 0);
    assert!(!search.saturated);
}

#[test]
fn test_hue_shift_stops_one_past_first_success() {
    let average = [40.0, 120.0, 90.0];
    let search = find_hue_shift(average);
    assert!(!search.saturated);

    let hit = search.degrees - 1;
    assert!(HueRotation::new(hit).shifted_red(40.0, 120.0, 90.0) >= 60.0);
    if hit > 0 {
        assert!(HueRotation::new(hit - 1).shifted_red(40.0, 120.0, 90.0) < 60.0);
    }
}

#[test]
fn test_hue_shift_saturates_on_black() {
    let search = find_hue_shift([0.0, 0.0, 0.0]);
    assert!(search.saturated);
    assert_eq!(search.degrees, MAX_HUE_SHIFT + 1);
}

#[test]
fn test_normalizing_interval_picks_widest_gap() {
    let mut histogram = [0u64; 256];
    for bin in 50..=200 {
        histogram[bin] = 100;
    }
    let interval = normalizing_interval(&histogram, 1.0);
    assert_eq!(interval, ChannelInterval { low: 49, high: 201 });
}

#[test]
fn test_normalizing_interval_ignores_noise_floor() {
    let mut histogram = [0u64; 256];
    for bin in 100..=150 {
        histogram[bin] = 1000;
    }
    // Sparse noise below the threshold is treated as empty.
    histogram[10] = 6;
    histogram[240] = 6;
    let interval = normalizing_interval(&histogram, 5.0);
    assert_eq!(interval, ChannelInterval { low: 99, high: 151 });
}

#[test]
fn test_normalizing_interval_handles_counts_past_u32() {
    // Bin counts of a frame with more than u32::MAX pixels.
    let mut histogram = [0u64; 256];
    for bin in 20..=230 {
        histogram[bin] = 5_000_000_000;
    }
    let threshold_level = (211.0 * 5_000_000_000.0) / 2000.0;
    let interval = normalizing_interval(&histogram, threshold_level);
    assert_eq!(interval, ChannelInterval { low: 19, high: 231 });
}

#[test]
fn test_degenerate_interval_is_identity_contribution() {
    let interval = ChannelInterval { low: 42, high: 42 };
    assert_eq!(interval.gain_offset(), (1.0, 0.0));

    let interval = ChannelInterval { low: 0, high: 128 };
    assert_eq!(interval.gain_offset(), (2.0, 0.0));

    let interval = ChannelInterval { low: 64, high: 192 };
    let (gain, offset) = interval.gain_offset();
    assert_eq!(gain, 2.0);
    assert_eq!(offset, -0.5);
}

#[test]
fn test_parallel_histograms_match_sequential() {
    let pixels = underwater_scene(640, 480);
    let rotation = HueRotation::new(37);
    let histograms = ChannelHistograms::build(&pixels, rotation);

    let mut expected = ChannelHistograms::default();
    for px in pixels.data().chunks_exact(4) {
        let red = rotation
            .shifted_red(px[0] as f64, px[1] as f64, px[2] as f64)
            .clamp(0.0, 255.0)
            .round() as usize;
        expected.red[red] += 1;
        expected.green[px[1] as usize] += 1;
        expected.blue[px[2] as usize] += 1;
    }
    assert_eq!(histograms, expected);
    assert_eq!(histograms.green.iter().sum::<u64>(), 640 * 480);
}
