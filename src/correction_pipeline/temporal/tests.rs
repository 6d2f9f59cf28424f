use std::collections::HashSet;

use crate::correction_pipeline::common::cancel::CancellationToken;
use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::estimator::MatrixEstimator;
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::{MediaKind, PixelBuffer};
use crate::correction_pipeline::temporal::{
    FilterMatrixSequence, FrameSequenceSource, FrameSource, MAX_FIRST_FRAME_ATTEMPTS, SamplingMode,
    StillFrame, TemporalSampler,
};

/// Encodes the red byte of the first pixel into the red offset.
struct TaggingEstimator;

impl MatrixEstimator for TaggingEstimator {
    fn estimate(&self, pixels: &PixelBuffer) -> Result<ColorMatrix> {
        let mut coefficients = ColorMatrix::IDENTITY.into_coefficients();
        coefficients[4] = pixels.pixel(0, 0)[0] as f32;
        ColorMatrix::new(coefficients)
    }
}

fn tag(matrix: &ColorMatrix) -> f32 {
    matrix.get(0, 4)
}

struct MockVideo {
    duration: Option<f64>,
    timeouts: HashSet<usize>,
    broken: HashSet<usize>,
    interval: f64,
    seeks: Vec<f64>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MockVideo {
    fn new(duration: Option<f64>) -> Self {
        Self {
            duration,
            timeouts: HashSet::new(),
            broken: HashSet::new(),
            interval: 0.2,
            seeks: Vec::new(),
            cancel_after: None,
        }
    }
}

impl FrameSource for MockVideo {
    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn frame_at(&mut self, time: f64) -> Result<PixelBuffer> {
        self.seeks.push(time);
        if let Some((count, token)) = &self.cancel_after {
            if self.seeks.len() >= *count {
                token.cancel();
            }
        }
        let sample = (time / self.interval).round() as usize;
        if self.timeouts.contains(&sample) {
            return Err(CorrectionError::DecodeTimeout { time });
        }
        if self.broken.contains(&sample) {
            return Err(CorrectionError::DecodeError("corrupt frame".to_string()));
        }
        PixelBuffer::filled(4, 4, [10 * (sample as u8 + 1), 0, 0, 255])
    }
}

fn video_mode() -> SamplingMode {
    SamplingMode::Video {
        interval: 0.2,
        multi_matrix: true,
    }
}

#[test]
fn test_one_second_video_yields_five_samples() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(1.0));

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    assert_eq!(sequence.len(), 5);
    assert_eq!(source.seeks.len(), 5);
    assert_eq!(sequence.active_index(0.45), 2);
    assert_eq!(sequence.active_index(1.3), 4);
    assert_eq!(sequence.active_index(0.0), 0);
    let tags: Vec<f32> = sequence.matrices().iter().map(tag).collect();
    assert_eq!(tags, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    assert!(sequence.carried_forward().is_empty());
}

#[test]
fn test_seek_times_are_ordered() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(0.9));
    sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    assert_eq!(source.seeks.len(), 5);
    assert_eq!(source.seeks[0], 0.0);
    assert!(source.seeks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_active_index_clamps_odd_times() {
    let sequence = FilterMatrixSequence::sampled(vec![ColorMatrix::IDENTITY; 3], 0.2, Vec::new()).unwrap();
    assert_eq!(sequence.active_index(-1.0), 0);
    assert_eq!(sequence.active_index(f64::NAN), 0);
    assert_eq!(sequence.active_index(f64::INFINITY), 2);
    assert_eq!(sequence.active_index(0.39), 1);
}

#[test]
fn test_single_sequence_always_index_zero() {
    let sequence = FilterMatrixSequence::single(ColorMatrix::IDENTITY);
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence.active_index(123.0), 0);
}

#[test]
fn test_empty_sequence_rejected() {
    assert!(FilterMatrixSequence::sampled(Vec::new(), 0.2, Vec::new()).is_err());
}

#[test]
fn test_still_mode_estimates_once() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, SamplingMode::Still);
    let mut source = StillFrame::new(PixelBuffer::filled(3, 3, [7, 0, 0, 255]).unwrap());

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();
    assert_eq!(sequence.len(), 1);
    assert_eq!(tag(sequence.first()), 7.0);
}

#[test]
fn test_single_matrix_video_uses_first_frame() {
    let mode = SamplingMode::Video {
        interval: 0.2,
        multi_matrix: false,
    };
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, mode);
    let mut source = MockVideo::new(Some(10.0));

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();
    assert_eq!(sequence.len(), 1);
    assert_eq!(source.seeks, vec![0.0]);
}

#[test]
fn test_indeterminate_duration_falls_back_to_single() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    for duration in [None, Some(f64::INFINITY), Some(0.0)] {
        let mut source = MockVideo::new(duration);
        let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(source.seeks.len(), 1);
    }
}

#[test]
fn test_timeout_repeats_last_good_matrix() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(1.0));
    source.timeouts.insert(2);
    source.timeouts.insert(3);

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    let tags: Vec<f32> = sequence.matrices().iter().map(tag).collect();
    assert_eq!(tags, vec![10.0, 20.0, 20.0, 20.0, 50.0]);
    assert_eq!(sequence.carried_forward(), &[2, 3]);
}

#[test]
fn test_leading_timeout_backfilled_from_first_good() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(0.6));
    source.timeouts.insert(0);

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    let tags: Vec<f32> = sequence.matrices().iter().map(tag).collect();
    assert_eq!(tags, vec![20.0, 20.0, 30.0]);
    assert_eq!(sequence.carried_forward(), &[0]);
}

#[test]
fn test_all_samples_failing_is_an_error() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(0.4));
    source.timeouts.extend([0, 1]);

    let result = sampler.sample(&mut source, &CancellationToken::new());
    assert!(matches!(result, Err(CorrectionError::DecodeTimeout { .. })));
}

#[test]
fn test_unrecoverable_error_aborts() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let mut source = MockVideo::new(Some(1.0));
    source.broken.insert(1);

    let result = sampler.sample(&mut source, &CancellationToken::new());
    assert!(matches!(result, Err(CorrectionError::DecodeError(_))));
    assert_eq!(source.seeks.len(), 2);
}

#[test]
fn test_cancellation_between_samples() {
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());
    let token = CancellationToken::new();
    let mut source = MockVideo::new(Some(1.0));
    source.cancel_after = Some((2, token.clone()));

    let result = sampler.sample(&mut source, &token);
    assert!(matches!(result, Err(CorrectionError::Cancelled)));
    assert_eq!(source.seeks.len(), 2);
}

#[test]
fn test_invalid_interval_rejected() {
    let mode = SamplingMode::Video {
        interval: 0.0,
        multi_matrix: true,
    };
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, mode);
    let mut source = MockVideo::new(Some(1.0));
    assert!(matches!(
        sampler.sample(&mut source, &CancellationToken::new()),
        Err(CorrectionError::InvalidInput(_))
    ));
}

#[test]
fn test_mode_for_media() {
    assert_eq!(SamplingMode::for_media(MediaKind::Photo, 0.2, true), SamplingMode::Still);
    assert_eq!(
        SamplingMode::for_media(MediaKind::Video, 0.5, false),
        SamplingMode::Video {
            interval: 0.5,
            multi_matrix: false
        }
    );
}

#[test]
fn test_frame_sequence_source_with_real_estimator() {
    let frames = (0..10)
        .map(|i| PixelBuffer::filled(8, 8, [i * 5, 100, 150, 255]).unwrap())
        .collect();
    let mut source = FrameSequenceSource::new(frames, 10.0).unwrap();
    assert_eq!(source.duration(), Some(1.0));

    let sampler = TemporalSampler::new(video_mode()).with_preview_max_dimension(4);
    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    assert_eq!(sequence.len(), 5);
    assert!(sequence.matrices().iter().all(|m| m.is_finite()));
}

fn single_matrix_mode() -> SamplingMode {
    SamplingMode::Video {
        interval: 0.2,
        multi_matrix: false,
    }
}

#[test]
fn test_single_matrix_skips_undecodable_leading_frames() {
    let mut source = MockVideo::new(Some(1.0));
    source.timeouts.extend([0, 1]);
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, single_matrix_mode());

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    assert_eq!(sequence.len(), 1);
    assert_eq!(tag(sequence.first()), 30.0);
    assert_eq!(source.seeks.len(), 3);
}

#[test]
fn test_unknown_duration_fallback_skips_timeouts() {
    let mut source = MockVideo::new(None);
    source.timeouts.insert(0);
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, video_mode());

    let sequence = sampler.sample(&mut source, &CancellationToken::new()).unwrap();

    assert_eq!(sequence.len(), 1);
    assert_eq!(tag(sequence.first()), 20.0);
}

#[test]
fn test_first_frame_search_stops_at_end_of_source() {
    let mut source = MockVideo::new(Some(1.0));
    source.timeouts.extend(0..10);
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, single_matrix_mode());

    let result = sampler.sample(&mut source, &CancellationToken::new());

    assert!(matches!(result, Err(CorrectionError::DecodeTimeout { .. })));
    assert_eq!(source.seeks.len(), 5);
}

#[test]
fn test_first_frame_search_is_bounded_without_duration() {
    let mut source = MockVideo::new(None);
    source.timeouts.extend(0..MAX_FIRST_FRAME_ATTEMPTS + 10);
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, single_matrix_mode());

    let result = sampler.sample(&mut source, &CancellationToken::new());

    assert!(matches!(result, Err(CorrectionError::DecodeTimeout { .. })));
    assert_eq!(source.seeks.len(), MAX_FIRST_FRAME_ATTEMPTS);
}

#[test]
fn test_first_frame_search_stops_on_decode_error() {
    let mut source = MockVideo::new(Some(1.0));
    source.broken.insert(0);
    let sampler = TemporalSampler::with_estimator(TaggingEstimator, single_matrix_mode());

    let result = sampler.sample(&mut source, &CancellationToken::new());

    assert!(matches!(result, Err(CorrectionError::DecodeError(_))));
    assert_eq!(source.seeks.len(), 1);
}
