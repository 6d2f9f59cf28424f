//! TIFF container module
//!
//! Decodes input frames into RGBA8 pixel buffers and encodes exported images,
//! with various compression options.

mod reader;
mod standard_tiff_writer;
mod tiff_frame_reader;
pub mod types;
mod writer;


pub use reader::FrameReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use tiff_frame_reader::TiffFrameReader;
pub use types::TiffCompression;
pub use writer::ImageWriter;
