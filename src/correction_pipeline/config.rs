//! Correction pipeline configuration

use crate::correction_pipeline::export::DEFAULT_TILE_SIZE;
use crate::correction_pipeline::pixels::MediaKind;
use crate::correction_pipeline::temporal::{DEFAULT_SAMPLE_INTERVAL, SamplingMode};
use crate::correction_pipeline::tiff::TiffCompression;

/// Longest preview side for photos.
pub const PHOTO_PREVIEW_MAX_DIMENSION: usize = 2048;
/// Longest preview side for videos.
pub const VIDEO_PREVIEW_MAX_DIMENSION: usize = 1024;

/// Configuration for estimation, sampling and export
#[derive(Debug, Clone)]
pub struct CorrectionConfig {
    /// Seconds between video samples in multi-matrix mode
    pub sample_interval: f64,
    /// Estimate one matrix per sample interval for videos instead of a single one
    pub multi_matrix_video: bool,
    /// Largest tile edge rendered in one pass during export
    pub tile_size: usize,
    /// Preview cap for photos; the estimator sees the frame at this size
    pub photo_preview_max_dimension: usize,
    /// Preview cap for videos
    pub video_preview_max_dimension: usize,
    /// Whether to validate image dimensions before processing
    pub validate_dimensions: bool,
    /// Largest accepted input side when validating
    pub max_dimension: Option<usize>,
    /// Compression method for the encoded output
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            multi_matrix_video: false,
            tile_size: DEFAULT_TILE_SIZE,
            photo_preview_max_dimension: PHOTO_PREVIEW_MAX_DIMENSION,
            video_preview_max_dimension: VIDEO_PREVIEW_MAX_DIMENSION,
            validate_dimensions: true,
            max_dimension: Some(50000),
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl CorrectionConfig {
    pub fn builder() -> CorrectionConfigBuilder {
        CorrectionConfigBuilder::default()
    }

    pub fn preview_max_dimension(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Photo => self.photo_preview_max_dimension,
            MediaKind::Video => self.video_preview_max_dimension,
        }
    }

    pub fn sampling_mode(&self, kind: MediaKind) -> SamplingMode {
        SamplingMode::for_media(kind, self.sample_interval, self.multi_matrix_video)
    }
}

/// Builder for CorrectionConfig
#[derive(Default)]
pub struct CorrectionConfigBuilder {
    sample_interval: Option<f64>,
    multi_matrix_video: Option<bool>,
    tile_size: Option<usize>,
    photo_preview_max_dimension: Option<usize>,
    video_preview_max_dimension: Option<usize>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl CorrectionConfigBuilder {
    pub fn sample_interval(mut self, seconds: f64) -> Self {
        self.sample_interval = Some(seconds);
        self
    }

    pub fn multi_matrix_video(mut self, enable: bool) -> Self {
        self.multi_matrix_video = Some(enable);
        self
    }

    pub fn tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    pub fn photo_preview_max_dimension(mut self, max: usize) -> Self {
        self.photo_preview_max_dimension = Some(max);
        self
    }

    pub fn video_preview_max_dimension(mut self, max: usize) -> Self {
        self.video_preview_max_dimension = Some(max);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> CorrectionConfig {
        let default = CorrectionConfig::default();
        CorrectionConfig {
            sample_interval: self.sample_interval.unwrap_or(default.sample_interval),
            multi_matrix_video: self.multi_matrix_video.unwrap_or(default.multi_matrix_video),
            tile_size: self.tile_size.unwrap_or(default.tile_size),
            photo_preview_max_dimension: self
                .photo_preview_max_dimension
                .unwrap_or(default.photo_preview_max_dimension),
            video_preview_max_dimension: self
                .video_preview_max_dimension
                .unwrap_or(default.video_preview_max_dimension),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
