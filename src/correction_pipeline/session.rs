//! Preview session state.
//!
//! One session per loaded source: the matrix sequence built when the source
//! was opened, plus the sliders the user is currently moving.

use tracing::{info, instrument};

use crate::correction_pipeline::common::cancel::CancellationToken;
use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::config::CorrectionConfig;
use crate::correction_pipeline::export::{TileRenderer, TiledExporter};
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::{ImageBuffer, MediaKind, PixelBuffer};
use crate::correction_pipeline::temporal::{FilterMatrixSequence, FrameSource, TemporalSampler};
use crate::correction_pipeline::tweak::{TweakModel, TweakParameters};

#[derive(Debug)]
pub struct CorrectionSession {
    kind: MediaKind,
    sequence: FilterMatrixSequence,
    tweak: TweakParameters,
    cancel: CancellationToken,
}

impl CorrectionSession {
    pub fn new(kind: MediaKind, sequence: FilterMatrixSequence) -> Self {
        Self {
            kind,
            sequence,
            tweak: TweakParameters::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Samples `source` with the mode and preview cap configured for `kind`.
    ///
    /// `cancel` becomes the session's token, so closing the session also
    /// stops a later export.
    #[instrument(skip(source, config, cancel))]
    pub fn open<S: FrameSource + ?Sized>(
        kind: MediaKind,
        source: &mut S,
        config: &CorrectionConfig,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let sampler = TemporalSampler::new(config.sampling_mode(kind))
            .with_preview_max_dimension(config.preview_max_dimension(kind));
        let sequence = sampler.sample(source, &cancel)?;
        info!(kind = ?kind, matrices = sequence.len(), "Session opened");
        Ok(Self {
            kind,
            sequence,
            tweak: TweakParameters::default(),
            cancel,
        })
    }

    /// Session for a decoded photo.
    pub fn open_still(frame: &PixelBuffer, config: &CorrectionConfig) -> Result<Self> {
        let sampler = TemporalSampler::new(config.sampling_mode(MediaKind::Photo))
            .with_preview_max_dimension(config.photo_preview_max_dimension);
        Ok(Self::new(MediaKind::Photo, sampler.sample_still(frame)?))
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn sequence(&self) -> &FilterMatrixSequence {
        &self.sequence
    }

    pub fn tweak(&self) -> &TweakParameters {
        &self.tweak
    }

    pub fn set_tweak(&mut self, tweak: TweakParameters) -> Result<()> {
        if !tweak.is_finite() {
            return Err(CorrectionError::InvalidInput(format!(
                "tweak parameters must be finite, got {:?}",
                tweak
            )));
        }
        self.tweak = tweak;
        Ok(())
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tears the session down; in-flight exports stop at the next tile.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn base_matrix(&self, time: f64) -> &ColorMatrix {
        self.sequence.active(time)
    }

    /// Matrix handed to the renderer for playback time `time`.
    pub fn effective_matrix(&self, time: f64) -> ColorMatrix {
        TweakModel::apply(self.base_matrix(time), &self.tweak)
    }

    /// Full-resolution export of `frame` with the matrix active at `time`.
    pub fn export<R: TileRenderer>(
        &self,
        exporter: &TiledExporter<R>,
        frame: &PixelBuffer,
        time: f64,
    ) -> Result<ImageBuffer> {
        let matrix = self.effective_matrix(time);
        exporter.export(frame, &matrix, frame.width(), frame.height(), &self.cancel)
    }
}
