//! Complex multiplication.
//!
//! Four strategies share one entry point:
//! - axis fast paths when an operand is purely real or purely imaginary,
//! - the schoolbook product built on fused multiply-add,
//! - an overflow-safe re-derivation of the schoolbook result,
//! - Karatsuba's three-multiplication scheme for large precisions.
//!
//! [`mul`] picks one of them; the others are public so callers and tests can
//! force a strategy.

use crate::complex::{mul_fr, BigComplex};
use crate::precision::{can_round, next_working_precision};
use crate::rounding::{InexactCode, RoundingMode, RoundingPair};
use crate::scalar::{clamp_prec, ScalarExt};
use crate::special;
use dashu::integer::IBig;
use rug::float::Round;
use rug::ops::{AddAssignRound, AssignRound, MulAssignRound, NegAssign};
use rug::Float;
use std::cmp::Ordering;

/// Output precision in bits above which Karatsuba is preferred
/// (23 limbs of 64 bits).
pub const MUL_KARATSUBA_THRESHOLD: u32 = 23 * 64;

/// Extra Karatsuba attempts before falling back to the schoolbook product.
const MAX_MUL_LOOP: u32 = 1;

#[inline]
fn sign_bit(f: &Float) -> i32 {
    if f.is_sign_negative() {
        -1
    } else {
        1
    }
}

#[inline]
fn ternary(sign: i32) -> Ordering {
    sign.cmp(&0)
}

/// `rop = b * c`, correctly rounded per component.
pub fn mul(rop: &mut BigComplex, b: &BigComplex, c: &BigComplex, rnd: RoundingPair) -> InexactCode {
    mul_with_threshold(rop, b, c, rnd, MUL_KARATSUBA_THRESHOLD)
}

/// [`mul`] with an explicit Karatsuba switch-over precision, as carried by
/// [`ComplexConfig`](crate::ComplexConfig).
pub fn mul_with_threshold(
    rop: &mut BigComplex,
    b: &BigComplex,
    c: &BigComplex,
    rnd: RoundingPair,
    karatsuba_threshold_bits: u32,
) -> InexactCode {
    if let Some(inex) = special::mul(rop, b, c) {
        return inex;
    }

    if b.im.is_zero() {
        return mul_real(rop, c, b, rnd);
    }
    if c.im.is_zero() {
        return mul_real(rop, b, c, rnd);
    }

    if b.re.is_zero() {
        return mul_imag(rop, c, b, rnd);
    }
    if c.re.is_zero() {
        return mul_imag(rop, b, c, rnd);
    }

    // multiplying by self must overflow exactly like squaring does
    if b == c {
        return sqr(rop, b, rnd);
    }

    // Karatsuba loses too much when one operand's parts are far apart
    if exponent_spread(b) > i64::from(b.max_prec() / 2)
        || exponent_spread(c) > i64::from(c.max_prec() / 2)
    {
        return mul_naive(rop, b, c, rnd);
    }

    if rop.max_prec() <= karatsuba_threshold_bits {
        mul_naive(rop, b, c, rnd)
    } else {
        mul_karatsuba(rop, b, c, rnd)
    }
}

/// `rop = op^2`, correctly rounded per component.
pub fn sqr(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    if let Some(inex) = special::mul(rop, op, op) {
        return inex;
    }
    if op.im.is_zero() {
        return mul_real(rop, op, op, rnd);
    }
    if op.re.is_zero() {
        return mul_imag(rop, op, op, rnd);
    }
    mul_naive(rop, op, op, rnd)
}

/// Distance between the component exponents of a finite, nonzero operand.
fn exponent_spread(z: &BigComplex) -> i64 {
    match (z.re.exponent(), z.im.exponent()) {
        (Some(er), Some(ei)) => (er - ei).abs(),
        _ => 0,
    }
}

// ----------------------------------------------------------------------------
// Axis fast paths
// ----------------------------------------------------------------------------

/// `z = x * y` for `Im(y) == 0`: one real scaling, then zero-sign repair.
pub fn mul_real(
    z: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    let xrs = x.re.is_sign_negative();
    let xis = x.im.is_sign_negative();
    let yrs = y.re.is_sign_negative();
    let yis = y.im.is_sign_negative();

    let inex = mul_fr(z, x, &y.re, rnd);

    // the repair never touches the ternary
    if z.re.is_zero() {
        let negative = rnd.re() == RoundingMode::Down || (xrs != yrs && xis == yis);
        z.re.set_zero(negative);
    }
    if z.im.is_zero() {
        let negative = rnd.im() == RoundingMode::Down || (xrs != yis && xis != yrs);
        z.im.set_zero(negative);
    }
    inex
}

/// `z = x * y` for `Re(y) == 0` with `Im(x)` and `Im(y)` nonzero.
pub fn mul_imag(
    z: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    let sign = (y.re.is_sign_negative() != x.im.is_sign_negative())
        && (y.im.is_sign_negative() != x.re.is_sign_negative());

    // Re(z) = -Im(x)*Im(y), rounded in the mirrored direction
    let inex_re = z
        .re
        .assign_round(&x.im * &y.im, rnd.re().invert().into())
        .reverse();
    z.re.neg_assign();
    let inex_im = z.im.assign_round(&x.re * &y.im, rnd.im().into());

    // Re(z) cannot vanish, Im(z) may be a sum of two zeros
    if z.im.is_zero() {
        z.im.set_zero(rnd.im() == RoundingMode::Down || sign);
    }

    InexactCode::new(inex_re, inex_im)
}

// ----------------------------------------------------------------------------
// Schoolbook product
// ----------------------------------------------------------------------------

/// `z = x * y` with four real multiplications, `x` and `y` finite.
///
/// One cross product is formed exactly; the fused operation then rounds the
/// whole component once. An overflow anywhere reroutes to
/// [`mul_naive_overflow`].
pub fn mul_naive(
    z: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    let prec_v = clamp_prec(i64::from(x.prec_im()) + i64::from(y.max_prec()));

    // Re(z) = Re(x)*Re(y) - Im(x)*Im(y)
    let v = Float::with_val(prec_v, &x.im * &y.im);
    let inex_re = z
        .re
        .assign_round(x.re.mul_sub_ref(&y.re, &v), rnd.re().into());

    // Im(z) = Re(x)*Im(y) + Im(x)*Re(y)
    let v = Float::with_val(prec_v, &x.im * &y.re);
    let inex_im = z
        .im
        .assign_round(x.re.mul_add_ref(&y.im, &v), rnd.im().into());

    if z.is_finite() {
        InexactCode::new(inex_re, inex_im)
    } else {
        log::debug!("schoolbook product overflowed, re-deriving with tracked exponents");
        mul_naive_overflow(z, x, y, rnd)
    }
}

/// Schoolbook product for finite operands whose direct evaluation overflows.
///
/// Sub-products are formed separately. When both overflow and would cancel,
/// their exponents are moved into unbounded integers and compared so the
/// dominating one decides the signed infinity.
pub fn mul_naive_overflow(
    z: &mut BigComplex,
    x: &BigComplex,
    y: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    let prec = clamp_prec(i64::from(x.max_prec()) + i64::from(y.max_prec()));

    let inex_re = overflow_part(&mut z.re, (&x.re, &y.re), (&x.im, &y.im), true, prec, rnd.re());
    let inex_im = overflow_part(&mut z.im, (&x.re, &y.im), (&x.im, &y.re), false, prec, rnd.im());

    InexactCode::new(inex_re, inex_im)
}

/// `out = p*q - r*s` (or `+` when `subtract` is false) with overflow-aware
/// sign resolution.
fn overflow_part(
    out: &mut Float,
    (p, q): (&Float, &Float),
    (r, s): (&Float, &Float),
    subtract: bool,
    prec: u32,
    rnd: RoundingMode,
) -> Ordering {
    let u = Float::with_val(prec, p * q);
    let v = Float::with_val(prec, r * s);
    let signu = sign_bit(&u);
    // sign of the contribution of the second product
    let signv = if subtract { -sign_bit(&v) } else { sign_bit(&v) };

    if u.is_finite() {
        if v.is_finite() {
            return combine(out, &u, &v, subtract, rnd);
        }
        out.set_inf(signv < 0);
        return ternary(signv);
    }
    if v.is_finite() || signu == signv {
        out.set_inf(signu < 0);
        return ternary(signu);
    }

    // both products overflowed and cancel: compare true magnitudes
    let (mut p, mut q, mut r, mut s) = (p.clone(), q.clone(), r.clone(), s.clone());
    let mut eu = IBig::from(p.take_exponent()) + IBig::from(q.take_exponent());
    let mut ev = IBig::from(r.take_exponent()) + IBig::from(s.take_exponent());
    let mut u = Float::with_val(prec, &p * &q);
    eu += IBig::from(u.take_exponent());
    let mut v = Float::with_val(prec, &r * &s);
    ev += IBig::from(v.take_exponent());

    match eu.cmp(&ev) {
        Ordering::Greater => {
            out.set_inf(signu < 0);
            ternary(signu)
        }
        Ordering::Less => {
            out.set_inf(signv < 0);
            ternary(signv)
        }
        Ordering::Equal => {
            // Known-approximate: the shared exponent is not applied back.
            log::debug!("overflowed sub-products share exponent {eu}, combining normalized values");
            combine(out, &u, &v, subtract, rnd)
        }
    }
}

fn combine(out: &mut Float, u: &Float, v: &Float, subtract: bool, rnd: RoundingMode) -> Ordering {
    if subtract {
        out.assign_round(u - v, rnd.into())
    } else {
        out.assign_round(u + v, rnd.into())
    }
}

// ----------------------------------------------------------------------------
// Karatsuba
// ----------------------------------------------------------------------------

/// `rop = op1 * op2` with three real multiplications.
///
/// Writing `op1 = a + ib`, `op2 = c + id`, the imaginary part `ad + bc` is
/// exact from two full products and the real part is recovered from
/// `(a + b)(c - d) + (ad - bc)`, evaluated with every rounding away from zero
/// so a single can-round test certifies it. Components are first reordered
/// so `|a| >= |b|` and `|c| >= |d|`; each swap is a factor of `i` undone when
/// the result is stored. If the test fails twice the schoolbook product is
/// used instead.
pub fn mul_karatsuba(
    rop: &mut BigComplex,
    op1: &BigComplex,
    op2: &BigComplex,
    rnd: RoundingPair,
) -> InexactCode {
    let (mut a, mut b) = (&op1.re, &op1.im);
    let (mut c, mut d) = (&op2.re, &op2.im);

    // number of factors of i pulled out, and implicit signs of a and c
    let mut mul_i = 0u8;
    let mut mul_a = 1i32;
    let mut mul_c = 1i32;

    if a.cmp_abs(b) == Some(Ordering::Less) {
        // i*(a + ib) = -b + ia
        std::mem::swap(&mut a, &mut b);
        mul_i += 1;
        mul_a = -1;
    }
    if c.cmp_abs(d) == Some(Ordering::Less) {
        std::mem::swap(&mut c, &mut d);
        mul_i += 1;
        mul_c = -1;
    }

    // precision and direction for the part that ends up holding u
    let (prec_re, mut rnd_re) = if mul_i % 2 == 1 {
        (rop.prec_im(), rnd.im())
    } else {
        (rop.prec_re(), rnd.re())
    };
    if mul_i != 0 {
        rnd_re = rnd_re.invert();
    }

    let mut prec = rop.max_prec();
    let prec_v = clamp_prec(i64::from(a.prec()) + i64::from(d.prec()));
    let prec_w = clamp_prec(i64::from(b.prec()) + i64::from(c.prec()));

    let mut v = Float::with_val(prec_v, a * d);
    if mul_a == -1 {
        v.neg_assign();
    }
    let mut w = Float::with_val(prec_w, b * c);
    if mul_c == -1 {
        w.neg_assign();
    }

    // sign of v - w
    let sign_x = match v.cmp_abs(&w) {
        Some(Ordering::Greater) => 2 * v.sign() - w.sign(),
        Some(Ordering::Equal) => v.sign() - w.sign(),
        _ => v.sign() - 2 * w.sign(),
    };
    let sign_u = mul_a * a.sign() * mul_c * c.sign();

    if sign_x * sign_u < 0 {
        // exchange the operands so u and v - w share a sign
        std::mem::swap(&mut a, &mut c);
        std::mem::swap(&mut b, &mut d);
        std::mem::swap(&mut v, &mut w);
        std::mem::swap(&mut mul_a, &mut mul_c);
    }

    let target_prec = prec_re + u32::from(rnd_re.is_nearest());
    let mut u = Float::new(2);
    let mut inexact = false;
    let mut ok = false;

    for attempt in 0..=MAX_MUL_LOOP {
        prec = next_working_precision(prec, 3);
        let mut prec_u = prec;
        u = Float::new(prec);
        let mut x = Float::new(prec);

        // u = away(b +/- a)
        inexact = if mul_a == -1 {
            u.assign_round(b - a, Round::AwayZero)
        } else {
            u.assign_round(b + a, Round::AwayZero)
        } != Ordering::Equal;

        // x = away(+/-c - d)
        inexact |= if mul_c == -1 {
            x.assign_round(c + d, Round::AwayZero)
        } else {
            x.assign_round(c - d, Round::AwayZero)
        } != Ordering::Equal;
        if mul_c == -1 {
            x.neg_assign();
        }

        if !inexact {
            prec_u = clamp_prec(2 * i64::from(prec));
            u.set_prec_round(prec_u, Round::Nearest);
        }

        // u = away((a + b)(c - d))
        inexact |= u.mul_assign_round(&x, Round::AwayZero) != Ordering::Equal;

        // everything exact so far: try to make v - w exact too
        if !inexact {
            let prec_x = if v.is_zero() {
                i64::from(prec_w)
            } else if w.is_zero() {
                i64::from(prec_v)
            } else {
                let ev = v.exponent().unwrap_or(0);
                let ew = w.exponent().unwrap_or(0);
                // +1 for a carry
                (ev - ew).abs() + i64::from(prec_v.max(prec_w)) + 1
            };
            let prec_x = prec_x.min(i64::from(prec_u));
            if prec_x > i64::from(prec) {
                x.set_prec_round(clamp_prec(prec_x), Round::Nearest);
            }
        }

        let mut rnd_u = if sign_u > 0 {
            RoundingMode::Up
        } else {
            RoundingMode::Down
        };
        // x = ad - bc
        inexact |= x.assign_round(&v - &w, rnd_u.into()) != Ordering::Equal;

        // with u = 0, rnd_u must still push x away from zero
        if u.is_zero() {
            rnd_u = if x.cmp0() == Some(Ordering::Greater) {
                RoundingMode::Up
            } else {
                RoundingMode::Down
            };
        }
        // u = ac - bd
        inexact |= u.add_assign_round(&x, rnd_u.into()) != Ordering::Equal;

        ok = !inexact
            || can_round(
                &u,
                i64::from(prec_u) - 3,
                rnd_u,
                RoundingMode::Zero,
                target_prec,
            );
        log::trace!("karatsuba attempt {attempt}: working precision {prec}, ok = {ok}");
        if ok {
            break;
        }
    }

    if !ok {
        log::debug!("karatsuba could not round at {prec} bits, using schoolbook product");
        return mul_naive(rop, op1, op2, rnd);
    }

    // u was rounded away from ac - bd when inexact
    let u_dir = if inexact {
        ternary(u.sign())
    } else {
        Ordering::Equal
    };

    let (inex_re, inex_im) = match mul_i {
        0 => {
            let mut inex_re = rop.re.assign_round(&u, rnd.re().into());
            if inex_re == Ordering::Equal {
                inex_re = u_dir;
            }
            let inex_im = rop.im.assign_round(&v + &w, rnd.im().into());
            (inex_re, inex_im)
        }
        1 => {
            // (x + iy)/i = y - ix
            let mut inex_im = rop.im.assign_round(-&u, rnd.im().into());
            if inex_im == Ordering::Equal {
                inex_im = u_dir.reverse();
            }
            let inex_re = rop.re.assign_round(&v + &w, rnd.re().into());
            (inex_re, inex_im)
        }
        _ => {
            // z/i^2 = -z
            let mut inex_re = rop.re.assign_round(-&u, rnd.re().into());
            if inex_re == Ordering::Equal {
                inex_re = u_dir.reverse();
            }
            let inex_im = rop
                .im
                .assign_round(&v + &w, rnd.im().invert().into())
                .reverse();
            rop.im.neg_assign();
            (inex_re, inex_im)
        }
    };

    // exact cancellations take the sign the schoolbook product would give
    if rop.re.is_zero() {
        rop.re.set_zero(rnd.re() == RoundingMode::Down);
    }
    if rop.im.is_zero() {
        rop.im.set_zero(rnd.im() == RoundingMode::Down);
    }

    InexactCode::new(inex_re, inex_im)
}
