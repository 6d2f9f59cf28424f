//! Sampling types

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::MediaKind;

/// Seconds between video samples.
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.2;

/// How many base matrices a source gets, decided once per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMode {
    /// One matrix from the full decoded frame.
    Still,
    /// One matrix per `interval` seconds when `multi_matrix` is set and the
    /// source has a finite duration, otherwise one matrix from the first frame.
    Video { interval: f64, multi_matrix: bool },
}

impl SamplingMode {
    pub fn for_media(kind: MediaKind, interval: f64, multi_matrix: bool) -> Self {
        match kind {
            MediaKind::Photo => SamplingMode::Still,
            MediaKind::Video => SamplingMode::Video { interval, multi_matrix },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let SamplingMode::Video { interval, .. } = self {
            if !interval.is_finite() || *interval <= 0.0 {
                return Err(CorrectionError::InvalidInput(format!(
                    "sample interval must be a positive number of seconds, got {}",
                    interval
                )));
            }
        }
        Ok(())
    }
}

/// Time-ordered base matrices for one source. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMatrixSequence {
    matrices: Vec<ColorMatrix>,
    interval: Option<f64>,
    carried_forward: Vec<usize>,
}

impl FilterMatrixSequence {
    /// Sequence holding one matrix, active at every time.
    pub fn single(matrix: ColorMatrix) -> Self {
        Self {
            matrices: vec![matrix],
            interval: None,
            carried_forward: Vec::new(),
        }
    }

    /// Sequence with one matrix per `interval` seconds, entry 0 at t=0.
    /// `carried_forward` lists the sample indices whose matrix was copied
    /// from a neighbouring sample after a decode failure.
    pub fn sampled(matrices: Vec<ColorMatrix>, interval: f64, carried_forward: Vec<usize>) -> Result<Self> {
        if matrices.is_empty() {
            return Err(CorrectionError::InvalidInput(
                "a filter matrix sequence needs at least one matrix".to_string(),
            ));
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(CorrectionError::InvalidInput(format!(
                "invalid sample interval {}",
                interval
            )));
        }
        Ok(Self {
            matrices,
            interval: Some(interval),
            carried_forward,
        })
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn interval(&self) -> Option<f64> {
        self.interval
    }

    pub fn matrices(&self) -> &[ColorMatrix] {
        &self.matrices
    }

    pub fn carried_forward(&self) -> &[usize] {
        &self.carried_forward
    }

    pub fn first(&self) -> &ColorMatrix {
        &self.matrices[0]
    }

    /// `floor(time / interval)` clamped to the sequence. NaN and negative
    /// times map to 0.
    pub fn active_index(&self, time: f64) -> usize {
        let Some(interval) = self.interval else {
            return 0;
        };
        let last = self.matrices.len() - 1;
        let index = (time / interval).floor();
        if index.is_nan() || index <= 0.0 {
            0
        } else if index >= last as f64 {
            last
        } else {
            index as usize
        }
    }

    pub fn active(&self, time: f64) -> &ColorMatrix {
        &self.matrices[self.active_index(time)]
    }
}
