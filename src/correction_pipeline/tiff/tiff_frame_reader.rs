//! TIFF frame reader.
//!
//! Accepts 8- and 16-bit gray, gray+alpha, RGB and RGBA images and expands
//! them to RGBA8. 16-bit samples keep their high byte.

use std::io::Cursor;

use tracing::debug;

use ::tiff::ColorType;
use ::tiff::decoder::{Decoder, DecodingResult};

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::pixels::PixelBuffer;
use crate::correction_pipeline::tiff::reader::FrameReader;

pub struct TiffFrameReader;

impl FrameReader for TiffFrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder =
            Decoder::new(Cursor::new(data)).map_err(|e| CorrectionError::DecodeError(e.to_string()))?;
        let (width, height) = decoder
            .dimensions()
            .map_err(|e| CorrectionError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| CorrectionError::DecodeError(e.to_string()))?;

        let channels = match color_type {
            ColorType::Gray(8 | 16) => 1,
            ColorType::GrayA(8 | 16) => 2,
            ColorType::RGB(8 | 16) => 3,
            ColorType::RGBA(8 | 16) => 4,
            other => {
                return Err(CorrectionError::DecodeError(format!(
                    "unsupported TIFF color type {:?}",
                    other
                )));
            }
        };

        let samples: Vec<u8> = match decoder
            .read_image()
            .map_err(|e| CorrectionError::DecodeError(e.to_string()))?
        {
            DecodingResult::U8(values) => values,
            DecodingResult::U16(values) => values.iter().map(|&v| (v >> 8) as u8).collect(),
            _ => {
                return Err(CorrectionError::DecodeError(
                    "unsupported TIFF sample format".to_string(),
                ));
            }
        };

        debug!("Decoded image: {}x{} ({:?})", width, height, color_type);

        let data = samples
            .chunks_exact(channels)
            .flat_map(|s| match channels {
                1 => [s[0], s[0], s[0], u8::MAX],
                2 => [s[0], s[0], s[0], s[1]],
                3 => [s[0], s[1], s[2], u8::MAX],
                _ => [s[0], s[1], s[2], s[3]],
            })
            .collect();

        PixelBuffer::new(width as usize, height as usize, data)
    }
}
