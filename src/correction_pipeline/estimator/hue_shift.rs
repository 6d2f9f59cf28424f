//! Luma-preserving hue rotation and the search for the shift that lifts the
//! average red channel.

/// Target for the hue-shifted average red, on the 0..255 scale.
pub const MIN_AVG_RED: f64 = 60.0;

/// Largest rotation angle, in degrees, tried by the search.
pub const MAX_HUE_SHIFT: u32 = 120;

/// Per-channel weights of the red output of a hue rotation by a given angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRotation {
    red: f64,
    green: f64,
    blue: f64,
}

impl HueRotation {
    pub fn new(degrees: u32) -> Self {
        let radians = (degrees as f64).to_radians();
        let u = radians.cos();
        let w = radians.sin();
        Self {
            red: 0.299 + 0.701 * u + 0.168 * w,
            green: 0.587 - 0.587 * u + 0.330 * w,
            blue: 0.114 - 0.114 * u - 0.497 * w,
        }
    }

    /// Contributions of each input channel to the rotated red value.
    pub fn shift(&self, r: f64, g: f64, b: f64) -> (f64, f64, f64) {
        (self.red * r, self.green * g, self.blue * b)
    }

    /// Rotated red value for one color.
    pub fn shifted_red(&self, r: f64, g: f64, b: f64) -> f64 {
        let (r, g, b) = self.shift(r, g, b);
        r + g + b
    }
}

/// Outcome of the hue-shift search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueShiftSearch {
    /// Angle in degrees applied to every pixel afterwards.
    pub degrees: u32,
    /// The cap was hit before the shifted average red reached `MIN_AVG_RED`.
    pub saturated: bool,
}

/// Finds the rotation lifting the average red to at least `MIN_AVG_RED`.
///
/// Angles `0..=MAX_HUE_SHIFT` are tried in order; the returned angle is one
/// past the first angle that succeeds. If none does, the search saturates at
/// `MAX_HUE_SHIFT + 1` and reports it instead of looping further.
pub fn find_hue_shift(average: [f64; 3]) -> HueShiftSearch {
    let [r, g, b] = average;
    if r >= MIN_AVG_RED {
        return HueShiftSearch {
            degrees: 0,
            saturated: false,
        };
    }

    for degrees in 0..=MAX_HUE_SHIFT {
        if HueRotation::new(degrees).shifted_red(r, g, b) >= MIN_AVG_RED {
            return HueShiftSearch {
                degrees: degrees + 1,
                saturated: false,
            };
        }
    }

    HueShiftSearch {
        degrees: MAX_HUE_SHIFT + 1,
        saturated: true,
    }
}
