use std::io::Write;

use crate::correction_pipeline::common::error::Result;
use crate::correction_pipeline::config::CorrectionConfig;
use crate::correction_pipeline::pixels::ImageBuffer;

pub trait ImageWriter {
    fn write_image(&self, image: &ImageBuffer, output: &mut dyn Write, config: &CorrectionConfig) -> Result<()>;
}
