//! Tweak parameter types

/// Live user adjustments applied on top of the estimated matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweakParameters {
    /// Fraction of the estimated correction to apply. 1.0 is the full
    /// correction, 0.0 none, above 1.0 over-corrects.
    pub gain: f32,
    /// Negative removes blue, positive removes green.
    pub green_blue: f32,
    /// Negative removes red, positive adds red.
    pub red: f32,
}

impl Default for TweakParameters {
    fn default() -> Self {
        Self {
            gain: 1.0,
            green_blue: 0.0,
            red: 0.0,
        }
    }
}

impl TweakParameters {
    pub fn new(gain: f32, green_blue: f32, red: f32) -> Self {
        Self { gain, green_blue, red }
    }

    pub fn is_finite(&self) -> bool {
        self.gain.is_finite() && self.green_blue.is_finite() && self.red.is_finite()
    }
}

/// Blend weights of the four magic matrices, split from the signed sliders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagicWeights {
    pub less_blue: f32,
    pub less_green: f32,
    pub more_red: f32,
    pub less_red: f32,
}

impl MagicWeights {
    pub fn from_parameters(params: &TweakParameters) -> Self {
        let mut weights = Self::default();
        if params.green_blue < 0.0 {
            weights.less_blue = params.green_blue.abs();
        } else {
            weights.less_green = params.green_blue;
        }
        if params.red < 0.0 {
            weights.less_red = params.red.abs();
        } else {
            weights.more_red = params.red;
        }
        weights
    }
}
