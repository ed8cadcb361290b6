//! Simultaneous complex sine and cosine.
//!
//! `sin(x + iy) = sin x cosh y + i cos x sinh y` and
//! `cos(x + iy) = cos x cosh y - i sin x sinh y`: four products of the same
//! four real values, so one loop settles both results.

use crate::complex::BigComplex;
use crate::precision::{next_working_precision, round_settled, settled};
use crate::rounding::{InexactCode, RoundingMode, RoundingPair};
use rug::ops::NegAssign;
use rug::{Assign, Float};

/// Correctly rounded `sin(re + i*im)` into `sin` and `cos(re + i*im)` into
/// `cos`, for finite `re` and `im` that are both nonzero.
///
/// Components whose magnitude overflows saturate to a signed infinity.
pub(crate) fn sin_cos(
    sin: &mut BigComplex,
    cos: &mut BigComplex,
    re: &Float,
    im: &Float,
    rnd_sin: RoundingPair,
    rnd_cos: RoundingPair,
) -> (InexactCode, InexactCode) {
    debug_assert!(re.is_normal() && im.is_normal());

    let mut prec = sin.max_prec().max(cos.max_prec());
    loop {
        prec = next_working_precision(prec, 8);

        let (mut s, mut c) = (Float::new(prec), Float::new(prec));
        (&mut s, &mut c).assign(re.sin_cos_ref());
        let (mut sh, mut ch) = (Float::new(prec), Float::new(prec));
        (&mut sh, &mut ch).assign(im.sinh_cosh_ref());

        // each product carries three half-ulp roundings
        let sin_re = Float::with_val(prec, &s * &ch);
        let sin_im = Float::with_val(prec, &c * &sh);
        let cos_re = Float::with_val(prec, &c * &ch);
        let mut cos_im = Float::with_val(prec, &s * &sh);
        cos_im.neg_assign();

        let err = i64::from(prec) - 3;
        let ready = settled(&sin_re, err, rnd_sin.re(), sin.prec_re())
            && settled(&sin_im, err, rnd_sin.im(), sin.prec_im())
            && settled(&cos_re, err, rnd_cos.re(), cos.prec_re())
            && settled(&cos_im, err, rnd_cos.im(), cos.prec_im());
        log::trace!("sin_cos: working precision {prec}, settled = {ready}");
        if !ready {
            continue;
        }

        let inex_sin = InexactCode::new(
            round_settled(&mut sin.re, &sin_re, rnd_sin.re()),
            round_settled(&mut sin.im, &sin_im, rnd_sin.im()),
        );
        let inex_cos = InexactCode::new(
            round_settled(&mut cos.re, &cos_re, rnd_cos.re()),
            round_settled(&mut cos.im, &cos_im, rnd_cos.im()),
        );
        return (inex_sin, inex_cos);
    }
}

/// Both results rounded toward zero, as the tangent loop consumes them.
pub(crate) fn sin_cos_toward_zero(
    sin: &mut BigComplex,
    cos: &mut BigComplex,
    re: &Float,
    im: &Float,
) -> (InexactCode, InexactCode) {
    let rz = RoundingPair::both(RoundingMode::Zero);
    sin_cos(sin, cos, re, im, rz, rz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_real_identities() {
        let re = Float::with_val(53, 0.5);
        let im = Float::with_val(53, 0.25);
        let mut s = BigComplex::new(53);
        let mut c = BigComplex::new(53);
        sin_cos(&mut s, &mut c, &re, &im, RoundingPair::NN, RoundingPair::NN);

        let sin_x = Float::with_val(200, re.sin_ref());
        let expected_sin_re = Float::with_val(200, &sin_x * Float::with_val(200, im.cosh_ref()));
        let expected_cos_im = -(sin_x * Float::with_val(200, im.sinh_ref()));
        assert_eq!(s.re, Float::with_val(53, &expected_sin_re));
        assert_eq!(c.im, Float::with_val(53, &expected_cos_im));
        assert!(c.im.is_sign_negative());
    }

    #[test]
    fn toward_zero_never_exceeds_magnitude() {
        let re = Float::with_val(64, 1);
        let im = Float::with_val(64, 1);
        let mut s = BigComplex::new(20);
        let mut c = BigComplex::new(20);
        let (inex_s, inex_c) = sin_cos_toward_zero(&mut s, &mut c, &re, &im);
        // sin(1 + i) = 1.2984... + 0.6349...i, cos(1 + i) = 0.8337... - 0.9888...i
        assert_eq!(inex_s.re_sign(), -1);
        assert_eq!(inex_s.im_sign(), -1);
        assert_eq!(inex_c.re_sign(), -1);
        assert_eq!(inex_c.im_sign(), 1);
    }

    #[test]
    fn large_imaginary_part_saturates() {
        let re = Float::with_val(53, 1);
        let mut im = Float::with_val(53, 1);
        im <<= 62;
        let mut s = BigComplex::new(53);
        let mut c = BigComplex::new(53);
        let nn = RoundingPair::NN;
        let (inex_s, _) = sin_cos(&mut s, &mut c, &re, &im, nn, nn);
        assert!(s.re.is_infinite() && s.re.is_sign_positive());
        assert!(s.im.is_infinite());
        assert!(c.im.is_infinite() && c.im.is_sign_negative());
        assert_eq!(inex_s.re_sign(), 1);
    }
}
