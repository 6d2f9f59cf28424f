use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::correction_pipeline::{
    common::{CancellationToken, CorrectionError, Result},
    config::CorrectionConfig,
    export::TiledExporter,
    matrix::ColorMatrix,
    session::CorrectionSession,
    tiff::{FrameReader, ImageWriter, StandardTiffWriter, TiffFrameReader},
    tweak::TweakParameters,
};

/// What a conversion produced, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub width: usize,
    pub height: usize,
    pub base_matrix: ColorMatrix,
    pub effective_matrix: ColorMatrix,
}

pub struct PhotoCorrectionPipeline<R: FrameReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: CorrectionConfig,
}

impl PhotoCorrectionPipeline<TiffFrameReader, StandardTiffWriter> {
    pub fn new(config: CorrectionConfig) -> Self {
        Self {
            reader: TiffFrameReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: FrameReader, W: ImageWriter> PhotoCorrectionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: CorrectionConfig) -> Self {
        Self { reader, writer, config }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(CorrectionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(CorrectionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output, tweak, cancel), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        tweak: TweakParameters,
        cancel: &CancellationToken,
    ) -> Result<ConversionSummary> {
        info!("Starting underwater color correction");

        let frame = {
            let _span = tracing::info_span!("decode_frame").entered();
            self.reader.read_frame(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = frame.width(),
                height = frame.height()
            )
            .entered();
            self.validate_dimensions(frame.width(), frame.height())?;
        }

        let mut session = {
            let _span = tracing::info_span!("estimate").entered();
            CorrectionSession::open_still(&frame, &self.config)?
        };
        session.set_tweak(tweak)?;
        cancel.check()?;

        let image = {
            let _span = tracing::info_span!("export").entered();
            let exporter = TiledExporter::new(self.config.tile_size);
            let matrix = session.effective_matrix(0.0);
            exporter.export(&frame, &matrix, frame.width(), frame.height(), cancel)?
        };

        {
            let _span = tracing::info_span!("encode").entered();
            self.writer.write_image(&image, output, &self.config)?;
        }

        info!(width = image.width(), height = image.height(), "Correction complete");
        Ok(ConversionSummary {
            width: image.width(),
            height: image.height(),
            base_matrix: *session.base_matrix(0.0),
            effective_matrix: session.effective_matrix(0.0),
        })
    }

    /// Converts `input_path` into `output_path`. The output file is only
    /// created once the corrected image has been encoded.
    #[instrument(skip(self, input_path, output_path, tweak))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        tweak: TweakParameters,
    ) -> Result<ConversionSummary> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                CorrectionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut encoded: Vec<u8> = Vec::new();
        let summary = self.convert(&input_data, &mut encoded, tweak, &CancellationToken::new())?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                CorrectionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(summary)
    }

    pub fn config(&self) -> &CorrectionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CorrectionConfig) {
        self.config = config;
    }
}
