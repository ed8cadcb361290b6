//! Complex tangent.
//!
//! `tan(z) = sin(z) / cos(z)`, with sine, cosine and quotient all rounded
//! away from zero at a working precision `w`. The real part of the quotient is
//! then within `7`, `8` or `5 + k` ulps of the exact value depending on the
//! exponent quantity
//! `k = Exp(Re sin) - Exp(Re q) + max(-Exp(Re cos), Exp(Re cos) - 2 Exp(Im cos))`;
//! the imaginary part is within `2^6` ulps.

use crate::complex::BigComplex;
use crate::div::div_unscaled;
use crate::precision::{
    can_round, magnitude_ternary, next_working_precision, rounds_away, saturate, scale_rounded,
};
use crate::rounding::{InexactCode, RoundingMode, RoundingPair};
use crate::scalar::ScalarExt;
use crate::sin_cos::sin_cos_toward_zero;
use crate::special;
use rug::float;
use rug::ops::AssignRound;
use rug::{Assign, Float};
use std::cmp::Ordering;
use std::f64::consts::LOG2_E;

/// `rop = tan(op)`, correctly rounded per component.
pub fn tan(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    tan_parts(rop, &op.re, &op.im, rnd)
}

/// `rop = tan(re + i*im)` with the operand given by its components, so a
/// caller can present them in either order without copying.
pub(crate) fn tan_parts(
    rop: &mut BigComplex,
    re: &Float,
    im: &Float,
    rnd: RoundingPair,
) -> InexactCode {
    if let Some(inex) = special::tan(rop, re, im, rnd) {
        return inex;
    }
    if real_part_underflows(im) {
        return large_imaginary(rop, re, im, rnd);
    }

    let rzz = RoundingPair::both(RoundingMode::Zero);
    let mut prec = rop.max_prec();
    let mut err: i64 = 7;

    loop {
        prec = next_working_precision(prec, err);
        let mut x = BigComplex::new(prec);
        let mut y = BigComplex::new(prec);

        // sin and cos are never exact here: truncate, then step away from zero
        sin_cos_toward_zero(&mut x, &mut y, re, im);
        x.re.add_one_ulp();
        x.im.add_one_ulp();
        y.re.add_one_ulp();
        y.im.add_one_ulp();
        debug_assert!(!x.re.is_zero());

        if x.is_infinite() || y.is_infinite() {
            return large_imaginary(rop, re, im, rnd);
        }

        let exr = x.re.exponent().unwrap_or(0);
        let eyr = y.re.exponent().unwrap_or(0);
        let eyi = y.im.exponent().unwrap_or(0);

        // q holds the quotient's significands, its exponents are kept apart
        let mut q = BigComplex::new(prec);
        let (inex, (shift_re, shift_im)) = div_unscaled(&mut q, &x, &y, rzz);

        // the exact tangent has no zero part here, but when sine and cosine
        // differ by almost exactly a factor i the rounded quotient can lose one
        if q.re.is_zero() || q.im.is_zero() {
            log::debug!("tan: quotient part cancelled at {prec} bits, doubling precision");
            err = i64::from(prec);
            continue;
        }
        if inex.re() != Ordering::Equal {
            q.re.add_one_ulp();
        }
        if inex.im() != Ordering::Equal {
            q.im.add_one_ulp();
        }

        let ezr = q.re.exponent().unwrap_or(0) + shift_re;
        let k = exr - ezr + (-eyr).max(eyr - 2 * eyi);
        err = match k {
            k if k < 2 => 7,
            2 => 8,
            k => 5 + k,
        };

        let work = i64::from(prec);
        let nearest = RoundingMode::Nearest;
        let ok = can_round(&q.re, work - err, nearest, rnd.re(), rop.prec_re())
            && can_round(&q.im, work - 6, nearest, rnd.im(), rop.prec_im());
        log::trace!("tan: working precision {prec}, k = {k}, real error 2^{err} ulps, ok = {ok}");
        if ok {
            let inex_re = rop.re.assign_round(&q.re, rnd.re().into());
            let inex_im = rop.im.assign_round(&q.im, rnd.im().into());
            return InexactCode::new(
                scale_rounded(&mut rop.re, inex_re, shift_re, rnd.re()),
                scale_rounded(&mut rop.im, inex_im, shift_im, rnd.im()),
            );
        }
    }
}

/// Whether `|Re tan(x + i*im)|` is below half the smallest magnitude for
/// every `x`.
///
/// `|Re tan(x + iy)| = |sin 2x| / (cos 2x + cosh 2y) <= 4 e^(-2|y|)` for
/// `|y| >= 1`; the check keeps one bit of slack on top.
fn real_part_underflows(im: &Float) -> bool {
    let y = im.to_f64().abs();
    let log2_bound = 2.0 - 2.0 * y * LOG2_E;
    log2_bound < f64::from(float::exp_min()) - 3.0
}

/// Closed form for a huge imaginary part: `tan(x + iy) = ±δ ± i(1 + ε)`.
///
/// `δ` has the sign of `sin 2x` and lies below half the smallest magnitude;
/// `ε` is far below one ulp of `1` and has the sign of `-cos 2x`.
fn large_imaginary(rop: &mut BigComplex, re: &Float, im: &Float, rnd: RoundingPair) -> InexactCode {
    let (sin_negative, cos_negative) = double_angle_signs(re);
    let away = rounds_away(rnd.re(), sin_negative);
    let inex_re = saturate(&mut rop.re, sin_negative, false, away);
    let inex_im = near_unit(&mut rop.im, im.is_sign_negative(), cos_negative, rnd.im());
    InexactCode::new(inex_re, inex_im)
}

/// Signs of `sin 2x` and `cos 2x`; neither vanishes for a nonzero finite `x`.
fn double_angle_signs(x: &Float) -> (bool, bool) {
    let mut twice = x.clone();
    twice <<= 1;
    if twice.is_finite() {
        let sin = Float::with_val(x.prec(), twice.sin_ref());
        let cos = Float::with_val(x.prec(), twice.cos_ref());
        return (sin.is_sign_negative(), cos.is_sign_negative());
    }
    // 2x is out of range: sin 2x = 2 sin x cos x, cos 2x = cos^2 x - sin^2 x
    let prec = x.prec() + 64;
    let (mut sin, mut cos) = (Float::new(prec), Float::new(prec));
    (&mut sin, &mut cos).assign(x.sin_cos_ref());
    let sin_negative = sin.is_sign_negative() != cos.is_sign_negative();
    (sin_negative, cos.cmp_abs(&sin) == Some(Ordering::Less))
}

/// Round `±(1 + ε)` for an `ε` far below one ulp, `beyond` when `ε > 0`.
fn near_unit(out: &mut Float, negative: bool, beyond: bool, rnd: RoundingMode) -> Ordering {
    out.assign(if negative { -1 } else { 1 });
    let away = rounds_away(rnd, negative);
    let stored_above = if beyond {
        if away {
            out.add_one_ulp();
        }
        away
    } else if rnd.is_nearest() || away {
        true
    } else {
        out.sub_one_ulp();
        false
    };
    magnitude_ternary(negative, stored_above)
}
