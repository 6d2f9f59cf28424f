use std::io::Write;

use tracing::debug;

use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder, colortype};
use ::tiff::tags::Predictor;

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::config::CorrectionConfig;
use crate::correction_pipeline::pixels::ImageBuffer;
use crate::correction_pipeline::tiff::types::TiffCompression;
use crate::correction_pipeline::tiff::writer::ImageWriter;

pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &ImageBuffer, output: &mut dyn Write, config: &CorrectionConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let mut buffer: Vec<u8> = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => Compression::Uncompressed,
                TiffCompression::Lzw => Compression::Lzw,
                TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
                TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
                TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
            };

            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| CorrectionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<colortype::RGBA8>(image.width() as u32, image.height() as u32, image.data())
                .map_err(|e| CorrectionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
