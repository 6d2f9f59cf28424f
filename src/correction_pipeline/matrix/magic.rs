//! Fixed secondary correction matrices blended in by the tweak sliders.

use crate::correction_pipeline::matrix::types::ColorMatrix;

/// Keeps blue with a -1.3 offset and adds 0.3x green to the green row.
pub const MAGIC_LESS_BLUE: ColorMatrix = ColorMatrix::from_coefficients([
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.3, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, -1.3, //
    0.0, 0.0, 0.0, 0.0, 0.0,
]);

/// Keeps green with a -1.3 offset and adds 0.3x blue to the blue row.
pub const MAGIC_LESS_GREEN: ColorMatrix = ColorMatrix::from_coefficients([
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, -1.3, //
    0.0, 0.0, 0.3, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0,
]);

pub const MAGIC_MORE_RED: ColorMatrix = ColorMatrix::from_coefficients([
    0.8, 0.7, 0.5, 0.0, -1.3, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0,
]);

pub const MAGIC_LESS_RED: ColorMatrix = ColorMatrix::from_coefficients([
    -0.8, -0.7, -0.5, 0.0, 1.3, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0,
]);
