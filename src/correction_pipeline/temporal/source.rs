//! Seekable frame sources.

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::pixels::PixelBuffer;

/// A decoder exposing one decode position at a time.
///
/// `frame_at` takes `&mut self` so seeks on one source can never overlap.
pub trait FrameSource {
    /// Finite duration in seconds, or `None` for streaming sources.
    fn duration(&self) -> Option<f64>;

    /// Seeks to `time` and returns the decoded frame there.
    fn frame_at(&mut self, time: f64) -> Result<PixelBuffer>;
}

/// A single decoded image behaving as a zero-length source.
#[derive(Debug, Clone)]
pub struct StillFrame {
    frame: PixelBuffer,
}

impl StillFrame {
    pub fn new(frame: PixelBuffer) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }
}

impl FrameSource for StillFrame {
    fn duration(&self) -> Option<f64> {
        None
    }

    fn frame_at(&mut self, _time: f64) -> Result<PixelBuffer> {
        Ok(self.frame.clone())
    }
}

/// Pre-decoded frames played back at a fixed rate.
#[derive(Debug, Clone)]
pub struct FrameSequenceSource {
    frames: Vec<PixelBuffer>,
    frame_rate: f64,
}

impl FrameSequenceSource {
    pub fn new(frames: Vec<PixelBuffer>, frame_rate: f64) -> Result<Self> {
        if frames.is_empty() {
            return Err(CorrectionError::InvalidInput("frame sequence is empty".to_string()));
        }
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(CorrectionError::InvalidInput(format!(
                "invalid frame rate {}",
                frame_rate
            )));
        }
        Ok(Self { frames, frame_rate })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for FrameSequenceSource {
    fn duration(&self) -> Option<f64> {
        Some(self.frames.len() as f64 / self.frame_rate)
    }

    fn frame_at(&mut self, time: f64) -> Result<PixelBuffer> {
        if !time.is_finite() || time < 0.0 {
            return Err(CorrectionError::SeekFailed {
                time,
                reason: "time outside of the source".to_string(),
            });
        }
        let index = ((time * self.frame_rate).floor() as usize).min(self.frames.len() - 1);
        Ok(self.frames[index].clone())
    }
}
