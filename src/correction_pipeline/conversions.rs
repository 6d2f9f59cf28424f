//! Pipeline conversions module
//!
//! End-to-end orchestration: decode, estimate, tweak, export, encode.

mod photo_pipeline;


pub use photo_pipeline::{ConversionSummary, PhotoCorrectionPipeline};
