//! Complex division.
//!
//! `x / y = x * conj(y) / |y|^2`. Both operands are first scaled by powers of
//! two so their larger components sit near 1; the two numerators and the
//! denominator are then formed without rounding, and each component costs a
//! single correctly rounded real division. The exponents removed along the
//! way are put back per component, so a quotient is only saturated when it
//! is itself out of range.

use crate::complex::BigComplex;
use crate::precision::scale_rounded;
use crate::rounding::{InexactCode, RoundingMode, RoundingPair};
use crate::scalar::{exact_add, exact_mul, exact_sub, ScalarExt};
use crate::special;
use rug::ops::AssignRound;
use rug::Float;
use std::cmp::Ordering;

/// `rop = x / y`, correctly rounded per component.
///
/// Exact sums are sized from the operands' exponent spread, so operands whose
/// components differ wildly in magnitude make this proportionally slower.
pub fn div(
    rop: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    if let Some(inex) = special::div(rop, x, y) {
        return inex;
    }

    let (inex, (shift_re, shift_im)) = div_unscaled(rop, x, y, rnd);
    InexactCode::new(
        scale_rounded(&mut rop.re, inex.re(), shift_re, rnd.re()),
        scale_rounded(&mut rop.im, inex.im(), shift_im, rnd.im()),
    )
}

/// Quotient of finite `x` by finite nonzero `y` with the exponents left out:
/// the exact real part is `q.re * 2^shift_re`, likewise for the imaginary
/// part, and each part of `q` is correctly rounded and within `[1/8, 8)` in
/// magnitude unless it is zero.
pub(crate) fn div_unscaled(
    q: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> (InexactCode, (i64, i64)) {
    let kx = max_exponent(x);
    let ky = max_exponent(y);
    let (a, b) = (scaled(&x.re, kx), scaled(&x.im, kx));
    let (c, d) = (scaled(&y.re, ky), scaled(&y.im, ky));

    let num_re = exact_add(&exact_mul(&a, &c), &exact_mul(&b, &d));
    let num_im = exact_sub(&exact_mul(&b, &c), &exact_mul(&a, &d));
    let mut den = exact_add(&exact_mul(&c, &c), &exact_mul(&d, &d));
    let base = i64::from(kx) - i64::from(ky) - den.take_exponent();

    let (inex_re, e_re) = quotient(&mut q.re, num_re, &den, rnd.re());
    let (inex_im, e_im) = quotient(&mut q.im, num_im, &den, rnd.im());
    (InexactCode::new(inex_re, inex_im), (base + e_re, base + e_im))
}

fn max_exponent(z: &BigComplex) -> i32 {
    match (z.re.get_exp(), z.im.get_exp()) {
        (Some(er), Some(ei)) => er.max(ei),
        (Some(e), None) | (None, Some(e)) => e,
        (None, None) => 0,
    }
}

fn scaled(v: &Float, k: i32) -> Float {
    let mut v = v.clone();
    v >>= k;
    v
}

// normalized numerator over normalized denominator, plus the numerator's exponent
fn quotient(out: &mut Float, mut num: Float, den: &Float, rnd: RoundingMode) -> (Ordering, i64) {
    let exp = num.take_exponent();
    (out.assign_round(&num / den, rnd.into()), exp)
}
