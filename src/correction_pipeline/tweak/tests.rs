use crate::correction_pipeline::matrix::{ColorMatrix, MAGIC_LESS_BLUE, MAGIC_MORE_RED};
use crate::correction_pipeline::tweak::{MagicWeights, TweakModel, TweakParameters};

fn sample_base() -> ColorMatrix {
    ColorMatrix::new([
        0.9, 1.4, 0.3, 0.0, -0.2, //
        0.0, 1.3, 0.0, 0.0, -0.1, //
        0.0, 0.0, 1.1, 0.0, -0.05, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ])
    .unwrap()
}

#[test]
fn test_default_tweak_returns_base() {
    let base = sample_base();
    let tweaked = TweakModel::apply(&base, &TweakParameters::default());
    for (a, b) in tweaked.coefficients().iter().zip(base.coefficients()) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }
}

#[test]
fn test_zero_gain_returns_identity() {
    let params = TweakParameters::new(0.0, 0.0, 0.0);
    assert_eq!(TweakModel::apply(&sample_base(), &params), ColorMatrix::IDENTITY);
    assert_eq!(
        TweakModel::apply(&ColorMatrix::IDENTITY, &params),
        ColorMatrix::IDENTITY
    );
}

#[test]
fn test_gain_scales_deviation_from_identity() {
    let base = sample_base();
    let tweaked = TweakModel::apply(&base, &TweakParameters::new(0.5, 0.0, 0.0));
    let identity = ColorMatrix::IDENTITY;
    for i in 0..20 {
        let expected = identity.coefficients()[i] + 0.5 * (base.coefficients()[i] - identity.coefficients()[i]);
        assert!((tweaked.coefficients()[i] - expected).abs() < 1e-6);
    }
}

#[test]
fn test_sign_selects_exactly_one_magic_weight() {
    for v in [0.25f32, 0.7, 1.0, 2.5] {
        let positive = MagicWeights::from_parameters(&TweakParameters::new(1.0, v, v));
        assert_eq!(positive.less_green, v);
        assert_eq!(positive.less_blue, 0.0);
        assert_eq!(positive.more_red, v);
        assert_eq!(positive.less_red, 0.0);

        let negative = MagicWeights::from_parameters(&TweakParameters::new(1.0, -v, -v));
        assert_eq!(negative.less_blue, v);
        assert_eq!(negative.less_green, 0.0);
        assert_eq!(negative.less_red, v);
        assert_eq!(negative.more_red, 0.0);
    }
}

#[test]
fn test_magic_terms_independent_of_gain() {
    let params = TweakParameters::new(0.0, -1.0, 0.5);
    let tweaked = TweakModel::apply(&sample_base(), &params);
    let identity = ColorMatrix::IDENTITY;
    for i in 0..20 {
        let expected = identity.coefficients()[i]
            + MAGIC_LESS_BLUE.coefficients()[i]
            + 0.5 * MAGIC_MORE_RED.coefficients()[i];
        assert!((tweaked.coefficients()[i] - expected).abs() < 1e-6);
    }
}

#[test]
fn test_non_finite_parameters_detected() {
    assert!(TweakParameters::default().is_finite());
    assert!(!TweakParameters::new(f32::NAN, 0.0, 0.0).is_finite());
    let tweaked = TweakModel::apply(&sample_base(), &TweakParameters::new(f32::INFINITY, 0.0, 0.0));
    assert!(tweaked.validate().is_err());
}
