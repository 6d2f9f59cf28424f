//! Temporal sampling module
//!
//! Builds the per-source sequence of base matrices and answers which one is
//! active at a given playback time.

mod sampler;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use sampler::{MAX_FIRST_FRAME_ATTEMPTS, TemporalSampler};
pub use source::{FrameSequenceSource, FrameSource, StillFrame};
pub use types::{DEFAULT_SAMPLE_INTERVAL, FilterMatrixSequence, SamplingMode};
