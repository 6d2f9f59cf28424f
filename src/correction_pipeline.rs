//! Underwater color correction pipeline
//!
//! This module provides the color-correction engine: estimating a cast-removal
//! matrix from pixel statistics, blending it with user adjustments, sampling
//! matrices over time for video, and exporting full-resolution results tile
//! by tile.

pub mod common;
pub mod config;
pub mod conversions;
pub mod estimator;
pub mod export;
pub mod matrix;
pub mod pixels;
pub mod session;
pub mod temporal;
pub mod tiff;
pub mod tweak;

pub use common::{
    CancellationToken,
    CorrectionError,
    Result,
};

pub use config::{
    CorrectionConfig,
    CorrectionConfigBuilder,
};

pub use matrix::ColorMatrix;

pub use pixels::{
    ImageBuffer,
    MediaKind,
    PixelBuffer,
};

pub use estimator::{
    Estimation,
    MatrixEstimator,
    UnderwaterEstimator,
};

pub use tweak::{
    TweakModel,
    TweakParameters,
};

pub use temporal::{
    FilterMatrixSequence,
    FrameSource,
    SamplingMode,
    TemporalSampler,
};

pub use export::{
    CpuTileRenderer,
    TileRenderer,
    TiledExporter,
};

pub use session::CorrectionSession;

pub use self::tiff::{
    FrameReader,
    ImageWriter,
    StandardTiffWriter,
    TiffCompression,
    TiffFrameReader,
};

pub use conversions::{
    ConversionSummary,
    PhotoCorrectionPipeline,
};
