use tracing::{debug, info, instrument, warn};

use crate::correction_pipeline::common::cancel::CancellationToken;
use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::estimator::{MatrixEstimator, UnderwaterEstimator};
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::PixelBuffer;
use crate::correction_pipeline::temporal::source::FrameSource;
use crate::correction_pipeline::temporal::types::{FilterMatrixSequence, SamplingMode};

/// Seeks tried when looking for the first decodable frame of a source whose
/// duration does not bound the search.
pub const MAX_FIRST_FRAME_ATTEMPTS: usize = 25;

/// Decides when to run the estimator on a source and collects the results.
pub struct TemporalSampler<E: MatrixEstimator> {
    estimator: E,
    mode: SamplingMode,
    preview_max_dimension: Option<usize>,
}

impl TemporalSampler<UnderwaterEstimator> {
    pub fn new(mode: SamplingMode) -> Self {
        Self::with_estimator(UnderwaterEstimator, mode)
    }
}

impl<E: MatrixEstimator> TemporalSampler<E> {
    pub fn with_estimator(estimator: E, mode: SamplingMode) -> Self {
        Self {
            estimator,
            mode,
            preview_max_dimension: None,
        }
    }

    /// Downscale every sampled frame to fit `max_dimension` before estimating.
    pub fn with_preview_max_dimension(mut self, max_dimension: usize) -> Self {
        self.preview_max_dimension = Some(max_dimension);
        self
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// One-entry sequence for an already decoded still image.
    pub fn sample_still(&self, frame: &PixelBuffer) -> Result<FilterMatrixSequence> {
        Ok(FilterMatrixSequence::single(self.estimate_frame(frame)?))
    }

    /// Builds the sequence for `source` according to the sampling mode.
    ///
    /// Seeks are issued one at a time. A cancelled token aborts between
    /// samples and the partial sequence is dropped.
    #[instrument(skip(self, source, cancel), fields(mode = ?self.mode))]
    pub fn sample<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
        cancel: &CancellationToken,
    ) -> Result<FilterMatrixSequence> {
        self.mode.validate()?;
        cancel.check()?;

        match self.mode {
            SamplingMode::Still => {
                let frame = source.frame_at(0.0)?;
                self.sample_still(&frame)
            }
            SamplingMode::Video {
                interval,
                multi_matrix,
            } => match source.duration() {
                Some(duration) if multi_matrix && duration.is_finite() && duration > 0.0 => {
                    self.sample_video(source, interval, duration, cancel)
                }
                duration => {
                    if multi_matrix {
                        warn!(?duration, "Source has no finite duration, using a single matrix");
                    }
                    let frame = first_decodable_frame(source, interval, cancel)?;
                    self.sample_still(&frame)
                }
            },
        }
    }

    fn sample_video<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
        interval: f64,
        duration: f64,
        cancel: &CancellationToken,
    ) -> Result<FilterMatrixSequence> {
        let mut matrices: Vec<ColorMatrix> = Vec::new();
        let mut carried_forward = Vec::new();
        // Failed samples before the first good one, filled in once it arrives.
        let mut leading_failures = 0usize;
        let mut last_error = None;

        let mut index = 0usize;
        loop {
            let time = index as f64 * interval;
            if time >= duration {
                break;
            }
            cancel.check()?;

            let sample = source
                .frame_at(time)
                .and_then(|frame| self.estimate_frame(&frame));

            match sample {
                Ok(matrix) => {
                    if leading_failures > 0 {
                        matrices.extend(std::iter::repeat_n(matrix, leading_failures));
                        leading_failures = 0;
                    }
                    matrices.push(matrix);
                }
                Err(e) if e.is_recoverable_sample_failure() => {
                    warn!(sample = index, time, error = %e, "Sample failed, repeating last good matrix");
                    carried_forward.push(index);
                    match matrices.last().copied() {
                        Some(previous) => matrices.push(previous),
                        None => leading_failures += 1,
                    }
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
            index += 1;
        }

        if matrices.is_empty() {
            return Err(last_error.unwrap_or_else(|| {
                CorrectionError::InvalidInput(format!("no samples fit in {:.3}s", duration))
            }));
        }

        info!(
            samples = matrices.len(),
            carried_forward = carried_forward.len(),
            "Built filter matrix sequence"
        );
        FilterMatrixSequence::sampled(matrices, interval, carried_forward)
    }

    fn estimate_frame(&self, frame: &PixelBuffer) -> Result<ColorMatrix> {
        match self.preview_max_dimension {
            Some(max) if frame.width() > max || frame.height() > max => {
                let preview = frame.downscale_to_fit(max)?;
                debug!(
                    "Estimating on {}x{} preview",
                    preview.width(),
                    preview.height()
                );
                self.estimator.estimate(&preview)
            }
            _ => self.estimator.estimate(frame),
        }
    }
}

/// Seeks forward by `step` from 0 until a frame decodes, skipping
/// `DecodeTimeout`/`SeekFailed`. Gives up at the end of the source or after
/// [`MAX_FIRST_FRAME_ATTEMPTS`] seeks and returns the last failure.
fn first_decodable_frame<S: FrameSource + ?Sized>(
    source: &mut S,
    step: f64,
    cancel: &CancellationToken,
) -> Result<PixelBuffer> {
    let end = source.duration().filter(|d| d.is_finite() && *d > 0.0);
    let mut index = 0usize;
    loop {
        let time = index as f64 * step;
        match source.frame_at(time) {
            Ok(frame) => {
                if index > 0 {
                    info!(time, "Using first decodable frame");
                }
                return Ok(frame);
            }
            Err(e) if e.is_recoverable_sample_failure() => {
                index += 1;
                let next = index as f64 * step;
                let exhausted = index >= MAX_FIRST_FRAME_ATTEMPTS || end.is_some_and(|d| next >= d);
                if exhausted {
                    return Err(e);
                }
                warn!(time, error = %e, "Frame not decodable, trying the next one");
                cancel.check()?;
            }
            Err(e) => return Err(e),
        }
    }
}
