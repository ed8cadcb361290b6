use arbcomplex_core::{
    add, conj, div, exp, mul, mul_fr, mul_i, mul_with_threshold, neg, set, sqr, sub, BigComplex,
    ComplexConfig, ConfigError, RoundingPair, DEFAULT_CONFIG,
};
use rug::float::{self, Constant, Round, Special};
use rug::Float;
use std::cmp::Ordering;

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn values_from_config_take_configured_precisions() {
    let config = ComplexConfig::from_json(
        r#"{ "default_precision_re": 100, "default_precision_im": 200 }"#,
    )
    .unwrap();
    let z = BigComplex::from_config(&config);
    assert_eq!(z.prec_re(), 100);
    assert_eq!(z.prec_im(), 200);
    assert!(z.is_zero());
    assert_eq!(config.karatsuba_threshold_bits, DEFAULT_CONFIG.karatsuba_threshold_bits);
}

#[test]
fn zero_threshold_is_rejected() {
    let err = ComplexConfig::from_json(r#"{ "karatsuba_threshold_bits": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroThreshold));
    assert_eq!(err.to_string(), "Karatsuba threshold must be positive");
}

#[test]
fn configured_threshold_does_not_change_results() {
    let config = ComplexConfig {
        karatsuba_threshold_bits: 64,
        ..DEFAULT_CONFIG
    };
    let prec = 300;
    let a = BigComplex::from_parts(
        Float::with_val(prec, 2).sqrt(),
        Float::with_val(prec, 3).sqrt(),
    );
    let b = BigComplex::from_parts(
        -Float::with_val(prec, 5).sqrt(),
        Float::with_val(prec, 7).sqrt(),
    );
    let mut tuned = BigComplex::new(prec);
    let mut default = BigComplex::new(prec);
    let threshold = config.karatsuba_threshold_bits;
    let i1 = mul_with_threshold(&mut tuned, &a, &b, RoundingPair::NN, threshold);
    let i2 = mul(&mut default, &a, &b, RoundingPair::NN);
    assert!(tuned.same_value(&default));
    assert_eq!(i1, i2);
}

// ============================================================================
// Component-wise operations
// ============================================================================

#[test]
fn set_rounds_into_destination_precision() {
    let op = BigComplex::with_val(64, 1.0 / 3.0, -2.0 / 3.0);
    let mut z = BigComplex::with_prec(8, 64);
    let inex = set(&mut z, &op, RoundingPair::UN);
    assert_eq!(inex.re(), Ordering::Greater);
    assert_eq!(inex.im(), Ordering::Equal);
    assert_eq!(z.im, op.im);
}

#[test]
fn neg_and_conj_flip_signs_exactly() {
    let op = BigComplex::with_val(53, 1.5, 0);
    let mut n = BigComplex::new(53);
    let mut c = BigComplex::new(53);
    assert!(neg(&mut n, &op, RoundingPair::NN).is_exact());
    assert!(conj(&mut c, &op, RoundingPair::NN).is_exact());
    assert_eq!(n.re, -1.5);
    assert!(n.im.is_zero() && n.im.is_sign_negative());
    assert_eq!(c.re, 1.5);
    assert!(c.im.is_zero() && c.im.is_sign_negative());
}

#[test]
fn add_and_sub_round_each_component() {
    let a = BigComplex::with_val(53, 1, 1);
    let mut b = BigComplex::with_val(53, 1, 1);
    b.re >>= 60;
    b.im >>= 60;
    let mut z = BigComplex::new(53);
    let inex = add(&mut z, &a, &b, RoundingPair::ZU);
    assert_eq!(z.re, 1);
    assert_eq!(inex.re(), Ordering::Less);
    assert!(z.im > 1);
    assert_eq!(inex.im(), Ordering::Greater);

    let inex = sub(&mut z, &a, &a, RoundingPair::NN);
    assert!(inex.is_exact());
    assert!(z.is_zero());
}

#[test]
fn mul_i_rotates_by_quarter_turn() {
    let op = BigComplex::with_val(53, 2, 3);
    let mut z = BigComplex::new(53);
    mul_i(&mut z, &op, false, RoundingPair::NN);
    assert_eq!((z.re.to_f64(), z.im.to_f64()), (-3.0, 2.0));
    mul_i(&mut z, &op, true, RoundingPair::NN);
    assert_eq!((z.re.to_f64(), z.im.to_f64()), (3.0, -2.0));
}

#[test]
fn mul_fr_scales_both_components() {
    let op = BigComplex::with_val(53, 2, -3);
    let mut z = BigComplex::new(53);
    let r = Float::with_val(53, 0.5);
    assert!(mul_fr(&mut z, &op, &r, RoundingPair::NN).is_exact());
    assert_eq!(z.re, 1);
    assert_eq!(z.im, -1.5);
}

// ============================================================================
// Division, squaring, exponential
// ============================================================================

#[test]
fn division_by_zero_is_infinite() {
    let x = BigComplex::with_val(53, 1, -1);
    let y = BigComplex::new(53);
    let mut z = BigComplex::new(53);
    div(&mut z, &x, &y, RoundingPair::NN);
    assert!(z.re.is_infinite() && z.re.is_sign_positive());
    assert!(z.im.is_infinite() && z.im.is_sign_negative());
}

#[test]
fn finite_over_infinite_is_zero() {
    let x = BigComplex::with_val(53, 1, 1);
    let y = BigComplex::with_val(53, Special::Infinity, 0);
    let mut z = BigComplex::new(53);
    let inex = div(&mut z, &x, &y, RoundingPair::NN);
    assert!(inex.is_exact());
    assert!(z.is_zero());
}

#[test]
fn division_matches_wide_reference() {
    let x = BigComplex::with_val(53, 0.7, -1.9);
    let y = BigComplex::with_val(53, -2.3, 0.4);
    let mut z = BigComplex::new(30);
    div(&mut z, &x, &y, RoundingPair::DU);

    let wide = 200;
    let den = Float::with_val(wide, &y.re * &y.re) + Float::with_val(wide, &y.im * &y.im);
    let re = (Float::with_val(wide, &x.re * &y.re) + Float::with_val(wide, &x.im * &y.im)) / &den;
    let im = (Float::with_val(wide, &x.im * &y.re) - Float::with_val(wide, &x.re * &y.im)) / &den;
    assert_eq!(z.re, Float::with_val_round(30, &re, Round::Down).0);
    assert_eq!(z.im, Float::with_val_round(30, &im, Round::Up).0);
}

#[test]
fn quotient_of_huge_operands_is_in_range() {
    let mut big = Float::with_val(53, 1);
    big <<= float::exp_max() - 1;
    let x = BigComplex::from_parts(big.clone(), Float::new(53));
    let y = BigComplex::from_parts(big.clone(), Float::new(53));
    let mut z = BigComplex::new(53);
    let inex = div(&mut z, &x, &y, RoundingPair::NN);
    assert!(inex.is_exact());
    assert_eq!(z.re, 1);
    assert!(z.im.is_zero());

    // (3 + 4i) * 2^(emax-3) / (4i * 2^(emax-3)) = 1 - 3i/4
    let mut scale = Float::with_val(53, 1);
    scale <<= float::exp_max() - 3;
    let three = Float::with_val(53, &scale * 3u32);
    let four = Float::with_val(53, &scale * 4u32);
    let x = BigComplex::from_parts(three, four.clone());
    let y = BigComplex::from_parts(Float::new(53), four);
    let inex = div(&mut z, &x, &y, RoundingPair::ZZ);
    assert!(inex.is_exact());
    assert_eq!(z.re, 1);
    assert_eq!(z.im, -0.75);
}

#[test]
fn tiny_over_huge_underflows_per_direction() {
    let mut tiny = Float::with_val(53, 1);
    tiny >>= 1 - float::exp_min();
    let mut big = Float::with_val(53, 1);
    big <<= float::exp_max() - 1;
    let x = BigComplex::from_parts(tiny.clone(), tiny);
    let y = BigComplex::from_parts(big, Float::new(53));
    let mut z = BigComplex::new(53);

    let inex = div(&mut z, &x, &y, RoundingPair::NN);
    assert!(z.re.is_zero() && z.im.is_zero());
    assert_eq!((inex.re(), inex.im()), (Ordering::Less, Ordering::Less));

    let inex = div(&mut z, &x, &y, RoundingPair::UD);
    assert_eq!(z.re.get_exp(), Some(float::exp_min()));
    assert!(z.im.is_zero() && z.im.is_sign_positive());
    assert_eq!((inex.re(), inex.im()), (Ordering::Greater, Ordering::Less));
}

#[test]
fn square_of_one_plus_i_is_two_i() {
    let op = BigComplex::with_val(10, 1, 1);
    let mut z = BigComplex::new(10);
    let inex = sqr(&mut z, &op, RoundingPair::NN);
    assert!(inex.is_exact());
    assert!(z.re.is_zero());
    assert_eq!(z.im, 2);
}

#[test]
fn exp_of_real_infinity_and_zero() {
    let mut z = BigComplex::new(53);

    let op = BigComplex::with_val(53, Special::NegInfinity, 1);
    exp(&mut z, &op, RoundingPair::NN);
    assert!(z.is_zero());

    let op = BigComplex::new(53);
    let inex = exp(&mut z, &op, RoundingPair::NN);
    assert!(inex.is_exact());
    assert_eq!(z.re, 1);
    assert!(z.im.is_zero());
}

fn huge_real_part(negative: bool) -> BigComplex {
    let mut x = Float::with_val(53, if negative { -1 } else { 1 });
    x <<= 62;
    BigComplex::from_parts(x, Float::with_val(53, 2))
}

#[test]
fn exp_overflow_follows_rounding_direction() {
    // e^x cos 2 is hugely negative, e^x sin 2 hugely positive
    let op = huge_real_part(false);
    let mut z = BigComplex::new(53);

    let inex = exp(&mut z, &op, RoundingPair::ZZ);
    assert!(z.re.is_finite() && z.re.is_sign_negative());
    assert!(z.im.is_finite() && z.im.is_sign_positive());
    assert_eq!((inex.re(), inex.im()), (Ordering::Greater, Ordering::Less));

    let inex = exp(&mut z, &op, RoundingPair::UD);
    assert!(z.re.is_finite() && z.im.is_finite());
    assert_eq!((inex.re(), inex.im()), (Ordering::Greater, Ordering::Less));

    let inex = exp(&mut z, &op, RoundingPair::DU);
    assert!(z.re.is_infinite() && z.re.is_sign_negative());
    assert!(z.im.is_infinite() && z.im.is_sign_positive());
    assert_eq!((inex.re(), inex.im()), (Ordering::Less, Ordering::Greater));
}

#[test]
fn exp_underflow_follows_rounding_direction() {
    // e^x cos 2 is a tiny negative value, e^x sin 2 a tiny positive one
    let op = huge_real_part(true);
    let mut z = BigComplex::new(53);

    let inex = exp(&mut z, &op, RoundingPair::NN);
    assert!(z.re.is_zero() && z.re.is_sign_negative());
    assert!(z.im.is_zero() && z.im.is_sign_positive());
    assert_eq!((inex.re(), inex.im()), (Ordering::Greater, Ordering::Less));

    let inex = exp(&mut z, &op, RoundingPair::UU);
    assert!(z.re.is_zero() && z.re.is_sign_negative());
    assert_eq!(z.im.get_exp(), Some(float::exp_min()));
    assert_eq!((inex.re(), inex.im()), (Ordering::Greater, Ordering::Greater));

    let inex = exp(&mut z, &op, RoundingPair::DD);
    assert_eq!(z.re.get_exp(), Some(float::exp_min()));
    assert!(z.re.is_sign_negative());
    assert!(z.im.is_zero() && z.im.is_sign_positive());
    assert_eq!((inex.re(), inex.im()), (Ordering::Less, Ordering::Less));
}

#[test]
fn exp_of_i_half_pi_is_nearly_i() {
    let half_pi = Float::with_val(200, Constant::Pi) / 2u32;
    let op = BigComplex::from_parts(Float::new(200), half_pi);
    let mut z = BigComplex::new(53);
    exp(&mut z, &op, RoundingPair::NN);
    assert_eq!(z.im, 1);
    assert!(z.re.clone().abs() < 1e-50);
}

// ============================================================================
// In-place forms
// ============================================================================

#[test]
fn assign_forms_match_free_functions() {
    let a = BigComplex::with_val(64, 0.8, -0.3);
    let b = BigComplex::with_val(64, -1.7, 2.2);
    let rnd = RoundingPair::NZ;

    let mut expected = BigComplex::new(64);
    let mut z = a.clone();

    let inex = add(&mut expected, &a, &b, rnd);
    assert_eq!(z.add_assign_round(&b, rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = sub(&mut expected, &a, &b, rnd);
    assert_eq!(z.sub_assign_round(&b, rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = div(&mut expected, &a, &b, rnd);
    assert_eq!(z.div_assign_round(&b, rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = sqr(&mut expected, &a, rnd);
    assert_eq!(z.square_assign_round(rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = exp(&mut expected, &a, rnd);
    assert_eq!(z.exp_assign_round(rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = arbcomplex_core::log(&mut expected, &a, rnd);
    assert_eq!(z.log_assign_round(rnd), inex);
    assert!(z.same_value(&expected));

    let mut z = a.clone();
    let inex = arbcomplex_core::tanh(&mut expected, &a, rnd);
    assert_eq!(z.tanh_assign_round(rnd), inex);
    assert!(z.same_value(&expected));
}
