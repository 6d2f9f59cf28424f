//! Color matrix module
//!
//! The 4x5 affine RGBA transform shared by the estimator, the tweak model,
//! the live preview and the tiled exporter.

mod magic;
pub mod types;


pub use magic::{MAGIC_LESS_BLUE, MAGIC_LESS_GREEN, MAGIC_LESS_RED, MAGIC_MORE_RED};
pub use types::{COEFFICIENT_COUNT, ColorMatrix};
