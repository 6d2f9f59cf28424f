//! Pixel buffer module
//!
//! Decoded RGBA8 frames, media kinds and the preview downscale applied before
//! estimation.

pub mod preview;
pub mod types;


pub use preview::{preview_dimensions, preview_scale};
pub use types::{BYTES_PER_PIXEL, ImageBuffer, MediaKind, PixelBuffer};
