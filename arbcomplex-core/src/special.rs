//! Special-value dispatch.
//!
//! Each operation asks this module first. NaN, infinite and signed-zero
//! operands are resolved here following the C99 Annex G conventions; the
//! return value is `Some(code)` when the result has been written and `None`
//! when the operand needs the generic numeric path.

use crate::complex::BigComplex;
use crate::rounding::{InexactCode, RoundingPair};
use crate::scalar::{exact_add, exact_mul, exact_sub, ScalarExt};
use rug::float::Constant;
use rug::ops::{AssignRound, NegAssign};
use rug::Float;
use std::cmp::Ordering;

/// -1 for a set sign bit, +1 otherwise (zeros and infinities included).
#[inline]
fn sign_bit(f: &Float) -> i32 {
    if f.is_sign_negative() {
        -1
    } else {
        1
    }
}

fn set_signed(f: &mut Float, sign: i32) {
    if sign == 0 {
        f.set_nan();
    } else {
        f.set_inf(sign < 0);
    }
}

fn set_nan_nan(rop: &mut BigComplex) -> Option<InexactCode> {
    rop.set_nan();
    Some(InexactCode::EXACT)
}

/// Writes `±0 + i*(±1)`; returns the imaginary ternary (exact unless the
/// output precision cannot hold 1, which never happens).
pub(crate) fn set_zero_unit(
    rop: &mut BigComplex,
    zero_negative: bool,
    unit_negative: bool,
    rnd: RoundingPair,
) -> Ordering {
    rop.re.set_zero(zero_negative);
    let unit = if unit_negative { -1 } else { 1 };
    rop.im.assign_round(unit, rnd.im().into())
}

// ----------------------------------------------------------------------------
// Multiplication
// ----------------------------------------------------------------------------

/// NaN and infinity handling for `b * c`.
pub(crate) fn mul(rop: &mut BigComplex, b: &BigComplex, c: &BigComplex) -> Option<InexactCode> {
    if b.is_infinite() {
        return Some(mul_infinite(rop, b, c));
    }
    if c.is_infinite() {
        return Some(mul_infinite(rop, c, b));
    }
    if b.is_nan() || c.is_nan() {
        return set_nan_nan(rop);
    }
    None
}

/// `z = x * y` where `x` has an infinite component.
///
/// The result signs come from the four sub-products `xr*yr`, `xi*yi`, `xr*yi`
/// and `xi*yr`. When that yields NaN in both halves, Annex G.5.1 recovery
/// reclassifies the operands and recomputes the signs so a genuine infinity
/// is not masked.
pub(crate) fn mul_infinite(z: &mut BigComplex, x: &BigComplex, y: &BigComplex) -> InexactCode {
    let xrs = sign_bit(&x.re);
    let xis = sign_bit(&x.im);
    let yrs = sign_bit(&y.re);
    let yis = sign_bit(&y.im);

    // signs of u = xr*yr - xi*yi and v = xr*yi + xi*yr; 0 stands for NaN
    let (mut u, mut v);
    if x.is_nan() || y.is_nan() {
        u = 0;
        v = 0;
    } else if x.re.is_infinite() {
        u = if y.re.is_zero()
            || (x.im.is_infinite() && y.im.is_zero())
            || (x.im.is_zero() && y.im.is_infinite())
            || ((x.im.is_infinite() || y.im.is_infinite()) && xrs * yrs == xis * yis)
        {
            0
        } else {
            xrs * yrs
        };
        v = if y.im.is_zero()
            || (x.im.is_infinite() && y.re.is_zero())
            || (x.im.is_zero() && y.re.is_infinite())
            || ((x.im.is_infinite() || y.re.is_infinite()) && xrs * yis != xis * yrs)
        {
            0
        } else {
            xrs * yis
        };
    } else {
        // x = xr + i*(±inf) with xr finite
        u = if y.im.is_zero()
            || (x.re.is_zero() && y.re.is_infinite())
            || (y.re.is_infinite() && xrs * yrs == xis * yis)
        {
            0
        } else {
            -xis * yis
        };
        v = if y.re.is_zero()
            || (x.re.is_zero() && y.im.is_infinite())
            || (y.im.is_infinite() && xrs * yis != xis * yrs)
        {
            0
        } else {
            xis * yrs
        };
    }

    if u == 0 && v == 0 {
        // Annex G.5.1: infinities become ±1, everything else 0
        let xr = i32::from(x.re.is_infinite());
        let xi = i32::from(x.im.is_infinite());
        let (yr, yi) = if y.is_infinite() {
            (i32::from(y.re.is_infinite()), i32::from(y.im.is_infinite()))
        } else {
            (i32::from(y.re.is_normal()), i32::from(y.im.is_normal()))
        };
        u = xrs * xr * yrs * yr - xis * xi * yis * yi;
        v = xrs * xr * yis * yi + xis * xi * yrs * yr;
    }

    set_signed(&mut z.re, u.signum());
    set_signed(&mut z.im, v.signum());
    InexactCode::EXACT
}

// ----------------------------------------------------------------------------
// Division
// ----------------------------------------------------------------------------

/// Annex G.5.1 handling for `x / y`: zero divisors, infinities and NaN.
pub(crate) fn div(rop: &mut BigComplex, x: &BigComplex, y: &BigComplex) -> Option<InexactCode> {
    if y.is_zero() && !(x.re.is_nan() && x.im.is_nan()) {
        // nonzero / 0 = infinity with the sign of the numerator times sign(Re y)
        let s = sign_bit(&y.re);
        for (out, part) in [(&mut rop.re, &x.re), (&mut rop.im, &x.im)] {
            if part.is_nan() || part.is_zero() {
                out.set_nan();
            } else {
                out.set_inf(s * sign_bit(part) < 0);
            }
        }
        return Some(InexactCode::EXACT);
    }
    if x.is_nan() || y.is_nan() {
        return set_nan_nan(rop);
    }
    if x.is_infinite() && y.is_finite() {
        let a = unit_or_zero(&x.re);
        let b = unit_or_zero(&x.im);
        let re = exact_add(&exact_mul(&a, &y.re), &exact_mul(&b, &y.im));
        let im = exact_sub(&exact_mul(&b, &y.re), &exact_mul(&a, &y.im));
        set_signed(&mut rop.re, re.sign());
        set_signed(&mut rop.im, im.sign());
        return Some(InexactCode::EXACT);
    }
    if y.is_infinite() && x.is_finite() {
        let c = unit_or_zero(&y.re);
        let d = unit_or_zero(&y.im);
        let re = exact_add(&exact_mul(&x.re, &c), &exact_mul(&x.im, &d));
        let im = exact_sub(&exact_mul(&x.im, &c), &exact_mul(&x.re, &d));
        rop.re.set_zero(re.is_sign_negative());
        rop.im.set_zero(im.is_sign_negative());
        return Some(InexactCode::EXACT);
    }
    if !x.is_finite() || !y.is_finite() {
        return set_nan_nan(rop);
    }
    None
}

/// `copysign(isinf(f) ? 1 : 0, f)`.
fn unit_or_zero(f: &Float) -> Float {
    if f.is_infinite() {
        Float::with_val(2, sign_bit(f))
    } else {
        Float::signed_zero(2, f.is_sign_negative())
    }
}

// ----------------------------------------------------------------------------
// Exponential
// ----------------------------------------------------------------------------

/// Special values and closed forms for `exp(x + iy)`.
pub(crate) fn exp(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> Option<InexactCode> {
    let (x, y) = (&op.re, &op.im);

    if x.is_nan() {
        if y.is_zero() {
            // exp(NaN ± i0) = NaN ± i0
            rop.re.set_nan();
            rop.im.set_zero(y.is_sign_negative());
            return Some(InexactCode::EXACT);
        }
        return set_nan_nan(rop);
    }

    if x.is_infinite() {
        let positive = x.is_sign_positive();
        if y.is_nan() || y.is_infinite() {
            if positive {
                rop.re.set_inf(false);
                rop.im.set_nan();
            } else {
                rop.re.set_zero(false);
                rop.im.set_zero(false);
            }
            return Some(InexactCode::EXACT);
        }
        if y.is_zero() {
            if positive {
                rop.re.set_inf(false);
            } else {
                rop.re.set_zero(false);
            }
            rop.im.set_zero(y.is_sign_negative());
            return Some(InexactCode::EXACT);
        }
        // ±inf * cis(y): only the signs of cos(y) and sin(y) matter
        let (mut s, mut c) = (Float::new(y.prec()), Float::new(y.prec()));
        s.assign_round(y.sin_ref(), rug::float::Round::Nearest);
        c.assign_round(y.cos_ref(), rug::float::Round::Nearest);
        if positive {
            rop.re.set_inf(c.is_sign_negative());
            rop.im.set_inf(s.is_sign_negative());
        } else {
            rop.re.set_zero(c.is_sign_negative());
            rop.im.set_zero(s.is_sign_negative());
        }
        return Some(InexactCode::EXACT);
    }

    if y.is_nan() || y.is_infinite() {
        return set_nan_nan(rop);
    }

    if y.is_zero() {
        let inex_re = rop.re.assign_round(x.exp_ref(), rnd.re().into());
        rop.im.set_zero(y.is_sign_negative());
        return Some(InexactCode::new(inex_re, Ordering::Equal));
    }
    if x.is_zero() {
        let inex_re = rop.re.assign_round(y.cos_ref(), rnd.re().into());
        let inex_im = rop.im.assign_round(y.sin_ref(), rnd.im().into());
        return Some(InexactCode::new(inex_re, inex_im));
    }
    None
}

// ----------------------------------------------------------------------------
// Logarithm
// ----------------------------------------------------------------------------

/// Non-finite operands and operands on the real or imaginary axis.
pub(crate) fn log(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> Option<InexactCode> {
    let (x, y) = (&op.re, &op.im);

    if !op.is_finite() {
        let inex_im = if x.is_nan() {
            if y.is_infinite() {
                rop.re.set_inf(false);
            } else {
                rop.re.set_nan();
            }
            rop.im.set_nan();
            Ordering::Equal
        } else if y.is_nan() {
            if x.is_infinite() {
                rop.re.set_inf(false);
            } else {
                rop.re.set_nan();
            }
            rop.im.set_nan();
            Ordering::Equal
        } else {
            let inex_im = rop.im.assign_round(y.atan2_ref(x), rnd.im().into());
            rop.re.set_inf(false);
            inex_im
        };
        return Some(InexactCode::new(Ordering::Equal, inex_im));
    }

    if y.is_zero() {
        if x.is_zero() {
            // log(±0 ± i0) = -inf + i*atan2(±0, ±0)
            let inex_im = rop.im.assign_round(y.atan2_ref(x), rnd.im().into());
            rop.re.set_inf(true);
            return Some(InexactCode::new(Ordering::Equal, inex_im));
        }
        if x.is_sign_positive() {
            let inex_re = rop.re.assign_round(x.ln_ref(), rnd.re().into());
            let inex_im = rop.im.assign_round(y, rnd.im().into());
            return Some(InexactCode::new(inex_re, inex_im));
        }
        // x < 0: log|x| ± i*pi, the sign following the zero
        let negative_zero = y.is_sign_negative();
        let rnd_im = if negative_zero {
            rnd.im().invert()
        } else {
            rnd.im()
        };
        let inex_re = rop.re.assign_round(x.as_neg().ln_ref(), rnd.re().into());
        let mut inex_im = rop.im.assign_round(Constant::Pi, rnd_im.into());
        if negative_zero {
            rop.im.neg_assign();
            inex_im = inex_im.reverse();
        }
        return Some(InexactCode::new(inex_re, inex_im));
    }

    if x.is_zero() {
        // log(±0 + iy) = log|y| ± i*pi/2
        let negative = y.is_sign_negative();
        let inex_re = rop.re.assign_round(y.as_abs().ln_ref(), rnd.re().into());
        let rnd_im = if negative {
            rnd.im().invert()
        } else {
            rnd.im()
        };
        let mut inex_im = rop.im.assign_round(Constant::Pi, rnd_im.into());
        // halving is exact and keeps the ternary
        rop.im >>= 1;
        if negative {
            rop.im.neg_assign();
            inex_im = inex_im.reverse();
        }
        return Some(InexactCode::new(inex_re, inex_im));
    }

    None
}

// ----------------------------------------------------------------------------
// Tangent
// ----------------------------------------------------------------------------

/// Special values and axis cases for `tan(re + i*im)`.
pub(crate) fn tan(
    rop: &mut BigComplex,
    re: &Float,
    im: &Float,
    rnd: RoundingPair,
) -> Option<InexactCode> {
    if !(re.is_finite() && im.is_finite()) {
        if re.is_nan() {
            if im.is_infinite() {
                // tan(NaN ± i*inf) = +0 ± i
                let inex_im = set_zero_unit(rop, false, im.is_sign_negative(), rnd);
                return Some(InexactCode::new(Ordering::Equal, inex_im));
            }
            return set_nan_nan(rop);
        }
        if im.is_nan() {
            if re.is_zero() {
                // tan(±0 + i*NaN) = ±0 + i*NaN
                rop.re.set_zero(re.is_sign_negative());
                rop.im.set_nan();
                return Some(InexactCode::EXACT);
            }
            return set_nan_nan(rop);
        }
        if re.is_infinite() {
            if im.is_infinite() {
                // tan(±inf ± i*inf) = ±0 ± i
                let inex_im =
                    set_zero_unit(rop, re.is_sign_negative(), im.is_sign_negative(), rnd);
                return Some(InexactCode::new(Ordering::Equal, inex_im));
            }
            return set_nan_nan(rop);
        }
        // tan(x ± i*inf) = +0*sin(x)*cos(x) ± i
        let mut s = Float::new(re.prec());
        let mut c = Float::new(re.prec());
        (&mut s, &mut c).assign_round(re.sin_cos_ref(), rug::float::Round::Nearest);
        let zero_negative = s.is_sign_negative() != c.is_sign_negative();
        let inex_im = set_zero_unit(rop, zero_negative, im.is_sign_negative(), rnd);
        return Some(InexactCode::new(Ordering::Equal, inex_im));
    }

    if re.is_zero() {
        // tan(±0 + iy) = ±0 + i*tanh(y)
        rop.re.set_zero(re.is_sign_negative());
        let inex_im = rop.im.assign_round(im.tanh_ref(), rnd.im().into());
        return Some(InexactCode::new(Ordering::Equal, inex_im));
    }

    if im.is_zero() {
        // tan(x ± i0) = tan(x) ± i0
        let inex_re = rop.re.assign_round(re.tan_ref(), rnd.re().into());
        rop.im.set_zero(im.is_sign_negative());
        return Some(InexactCode::new(inex_re, Ordering::Equal));
    }

    None
}
