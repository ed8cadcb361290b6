//! Working-precision management for Ziv-style evaluation loops.
//!
//! An approximation is computed at a working precision above the target,
//! together with a bound on its error. If every value inside that error
//! interval rounds to the same target value the loop stops; otherwise the
//! working precision grows and the error bound is recomputed from scratch.

use crate::rounding::RoundingMode;
use crate::scalar::{clamp_prec, ScalarExt};
use rug::float;
use rug::ops::AssignRound;
use rug::Float;
use std::cmp::Ordering;

/// Smallest `b` with `2^b >= n`.
pub fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        64 - (n - 1).leading_zeros()
    }
}

/// Next working precision: `prec + ceil(log2(prec)) + margin`.
pub fn next_working_precision(prec: u32, margin: i64) -> u32 {
    let grown = i64::from(prec) + i64::from(ceil_log2(u64::from(prec))) + margin;
    clamp_prec(grown)
}

/// Whether `approx` can be rounded to `prec` bits in direction `target`
/// without knowing the exact value.
///
/// The exact value is assumed to satisfy `|approx - exact| <= 2^(EXP(approx) - err_bits)`.
/// `err_dir` tells which side of `approx` the exact value may lie on:
/// `Nearest` for either side, `Up` when `approx` was rounded upward (exact at
/// or below it), `Down` for the converse, `Zero` when it was truncated.
///
/// Rounding to nearest is tested as truncation to one extra bit, which also
/// pins down the ternary outcome.
pub fn can_round(
    approx: &Float,
    err_bits: i64,
    err_dir: RoundingMode,
    target: RoundingMode,
    prec: u32,
) -> bool {
    let (test_mode, test_prec) = if target.is_nearest() {
        (RoundingMode::Zero, i64::from(prec) + 1)
    } else {
        (target, i64::from(prec))
    };

    let Some(exp) = approx.exponent() else {
        return false;
    };
    if err_bits <= test_prec {
        return false;
    }

    // approx +/- 2^(exp - err_bits) is exact at this width
    let wide = clamp_prec(i64::from(approx.prec()).max(err_bits) + 2);
    let eps_exp = exp - err_bits;
    let Ok(eps_exp) = i32::try_from(eps_exp) else {
        return false;
    };
    let mut eps = Float::with_val(2, 1);
    eps <<= eps_exp;

    let lower = Float::with_val(wide, approx - &eps);
    let upper = Float::with_val(wide, approx + &eps);
    let at = Float::with_val(wide, approx);
    let (lo, hi) = match err_dir {
        RoundingMode::Nearest => (lower, upper),
        RoundingMode::Up => (lower, at),
        RoundingMode::Down => (at, upper),
        RoundingMode::Zero if approx.is_sign_negative() => (lower, at),
        RoundingMode::Zero => (at, upper),
    };

    let test_prec = clamp_prec(test_prec);
    let (lo_r, _) = Float::with_val_round(test_prec, &lo, test_mode.into());
    let (hi_r, _) = Float::with_val_round(test_prec, &hi, test_mode.into());
    lo_r == hi_r && lo_r.is_sign_negative() == hi_r.is_sign_negative()
}

/// Whether a loop approximation with error below `2^(EXP - err_bits)` is
/// final: it saturated to zero or infinity, or it rounds unambiguously.
pub(crate) fn settled(approx: &Float, err_bits: i64, target: RoundingMode, prec: u32) -> bool {
    !approx.is_normal() || can_round(approx, err_bits, RoundingMode::Nearest, target, prec)
}

/// Round a [`settled`] approximation into `out`.
///
/// A saturated approximation stands for a finite, nonzero exact value beyond
/// the exponent range, so it rounds the way `rnd` treats overflow or underflow.
pub(crate) fn round_settled(out: &mut Float, approx: &Float, rnd: RoundingMode) -> Ordering {
    let negative = approx.is_sign_negative();
    if approx.is_infinite() {
        let away = rnd.is_nearest() || rounds_away(rnd, negative);
        return saturate(out, negative, true, away);
    }
    if approx.is_zero() {
        return saturate(out, negative, false, rounds_away(rnd, negative));
    }
    out.assign_round(approx, rnd.into())
}

/// Whether directed rounding of a value with this sign grows its magnitude.
pub(crate) fn rounds_away(rnd: RoundingMode, negative: bool) -> bool {
    match rnd {
        RoundingMode::Up => !negative,
        RoundingMode::Down => negative,
        RoundingMode::Nearest | RoundingMode::Zero => false,
    }
}

/// Ternary of a stored value whose magnitude is above (or below) the exact one.
pub(crate) fn magnitude_ternary(negative: bool, stored_above: bool) -> Ordering {
    if stored_above != negative {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Store the rounding of a nonzero exact value beyond the exponent range.
///
/// Overflow gives an infinity when rounding `away`, the largest finite
/// magnitude otherwise. Underflow gives the smallest magnitude when rounding
/// `away`, a signed zero otherwise.
pub(crate) fn saturate(out: &mut Float, negative: bool, overflow: bool, away: bool) -> Ordering {
    if overflow {
        out.set_inf(negative);
        if !away {
            out.sub_one_ulp();
        }
    } else {
        out.set_zero(negative);
        if away {
            out.add_one_ulp();
        }
    }
    magnitude_ternary(negative, away)
}

/// Multiply `out`, freshly rounded with ternary `inex`, by `2^shift`.
///
/// Results past either end of the exponent range saturate as if the exact
/// value had been rounded there directly. Round to nearest sends magnitudes
/// up to half the smallest one to zero.
pub(crate) fn scale_rounded(
    out: &mut Float,
    inex: Ordering,
    shift: i64,
    rnd: RoundingMode,
) -> Ordering {
    if !out.is_normal() {
        return inex;
    }
    let negative = out.is_sign_negative();
    let exp = out.take_exponent() + shift;
    let (emin, emax) = (i64::from(float::exp_min()), i64::from(float::exp_max()));
    if exp > emax {
        let away = rnd.is_nearest() || rounds_away(rnd, negative);
        return saturate(out, negative, true, away);
    }
    if exp < emin {
        let away = if rnd.is_nearest() {
            let exact_above = magnitude_ternary(negative, false) == inex;
            exp == emin - 1 && (*out.as_abs() != 0.5 || exact_above)
        } else {
            rounds_away(rnd, negative)
        };
        return saturate(out, negative, false, away);
    }
    let Ok(exp) = i32::try_from(exp) else {
        return inex;
    };
    *out <<= exp;
    inex
}
