use crate::correction_pipeline::common::error::Result;
use crate::correction_pipeline::pixels::PixelBuffer;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<PixelBuffer>;
}
