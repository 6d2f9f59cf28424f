use crate::correction_pipeline::matrix::{
    COEFFICIENT_COUNT, ColorMatrix, MAGIC_LESS_BLUE, MAGIC_LESS_GREEN, MAGIC_LESS_RED,
    MAGIC_MORE_RED,
};
use crate::correction_pipeline::tweak::types::{MagicWeights, TweakParameters};

/// Linear blend of a base matrix with the user sliders.
pub struct TweakModel;

impl TweakModel {
    /// `identity + gain * (base - identity)` plus the weighted magic matrices.
    ///
    /// Cheap enough to run on every slider event.
    pub fn apply(base: &ColorMatrix, params: &TweakParameters) -> ColorMatrix {
        let weights = MagicWeights::from_parameters(params);
        let identity = ColorMatrix::IDENTITY.into_coefficients();
        let base = base.coefficients();
        let less_blue = MAGIC_LESS_BLUE.coefficients();
        let less_green = MAGIC_LESS_GREEN.coefficients();
        let more_red = MAGIC_MORE_RED.coefficients();
        let less_red = MAGIC_LESS_RED.coefficients();

        let mut out = [0.0f32; COEFFICIENT_COUNT];
        for (i, value) in out.iter_mut().enumerate() {
            *value = identity[i]
                + params.gain * (base[i] - identity[i])
                + weights.less_blue * less_blue[i]
                + weights.less_green * less_green[i]
                + weights.more_red * more_red[i]
                + weights.less_red * less_red[i];
        }
        ColorMatrix::from_coefficients(out)
    }
}
