//! Color matrix types

use crate::correction_pipeline::common::error::{CorrectionError, Result};

/// Number of coefficients in a 4x5 row-major color matrix.
pub const COEFFICIENT_COUNT: usize = 20;

/// 4x5 row-major affine transform over RGBA.
///
/// `out[c] = sum_k m[c*5+k] * in[k] + m[c*5+4]` with `in = [r, g, b, a]` in
/// normalized `[0, 1]` units. The offset column is expressed in the same
/// normalized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    coefficients: [f32; COEFFICIENT_COUNT],
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        coefficients: [
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };

    /// Builds a matrix, rejecting NaN or infinite coefficients.
    pub fn new(coefficients: [f32; COEFFICIENT_COUNT]) -> Result<Self> {
        let matrix = Self { coefficients };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Builds a matrix without checking coefficients. Used for compile-time
    /// constants and for intermediate results validated later.
    pub const fn from_coefficients(coefficients: [f32; COEFFICIENT_COUNT]) -> Self {
        Self { coefficients }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn coefficients(&self) -> &[f32; COEFFICIENT_COUNT] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> [f32; COEFFICIENT_COUNT] {
        self.coefficients
    }

    /// Coefficient at `row` (0 = red .. 3 = alpha) and `column` (0..4, where 4 is the offset).
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.coefficients[row * 5 + column]
    }

    /// The five coefficients producing output channel `row`.
    pub fn row(&self, row: usize) -> [f32; 5] {
        let start = row * 5;
        let mut out = [0.0; 5];
        out.copy_from_slice(&self.coefficients[start..start + 5]);
        out
    }

    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(CorrectionError::InvalidInput(format!(
                "color matrix coefficient {} is not finite ({})",
                index, self.coefficients[index]
            )));
        }
        Ok(())
    }

    /// Applies the matrix to one normalized RGBA sample. The result is not clamped.
    pub fn transform(&self, rgba: [f32; 4]) -> [f32; 4] {
        let m = &self.coefficients;
        let mut out = [0.0f32; 4];
        for (c, value) in out.iter_mut().enumerate() {
            let row = &m[c * 5..c * 5 + 5];
            *value = row[0] * rgba[0] + row[1] * rgba[1] + row[2] * rgba[2] + row[3] * rgba[3] + row[4];
        }
        out
    }

    /// Applies the matrix to one 8-bit RGBA pixel, clamping and rounding back to bytes.
    pub fn transform_rgba8(&self, pixel: [u8; 4]) -> [u8; 4] {
        let normalized = pixel.map(|v| v as f32 / 255.0);
        self.transform(normalized)
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[f32; COEFFICIENT_COUNT]> for ColorMatrix {
    type Error = CorrectionError;

    fn try_from(coefficients: [f32; COEFFICIENT_COUNT]) -> Result<Self> {
        Self::new(coefficients)
    }
}

impl TryFrom<&[f32]> for ColorMatrix {
    type Error = CorrectionError;

    fn try_from(values: &[f32]) -> Result<Self> {
        let coefficients: [f32; COEFFICIENT_COUNT] = values.try_into().map_err(|_| {
            CorrectionError::InvalidInput(format!(
                "color matrix needs {} coefficients, got {}",
                COEFFICIENT_COUNT,
                values.len()
            ))
        })?;
        Self::new(coefficients)
    }
}
