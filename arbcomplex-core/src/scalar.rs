//! The real-number collaborator.
//!
//! Components of a [`BigComplex`](crate::BigComplex) are `rug::Float` values:
//! correctly rounded MPFR reals with their own precision, signed zeros,
//! infinities and NaN. [`ScalarExt`] gathers the small helpers every algorithm
//! needs, so sign-of-zero handling and exponent bookkeeping live in one place.

use rug::float::{self, Special};
use rug::{Assign, Float};
use std::cmp::Ordering;

/// Arbitrary precision real used for each component.
pub type Scalar = Float;

/// Coarse state of a scalar, used by the special-value tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarClass {
    Nan,
    Infinite,
    Zero,
    Finite,
}

pub trait ScalarExt {
    /// A zero of the given precision carrying an explicit sign.
    fn signed_zero(prec: u32, negative: bool) -> Self;

    fn set_zero(&mut self, negative: bool);

    fn set_inf(&mut self, negative: bool);

    fn set_nan(&mut self);

    fn class(&self) -> ScalarClass;

    /// -1, 0 or +1; NaN and both zeros report 0.
    fn sign(&self) -> i32;

    /// Binary exponent with the significand in [0.5, 1); `None` for zero,
    /// infinities and NaN.
    fn exponent(&self) -> Option<i64>;

    /// Move the value's exponent out so the significand sits in [0.5, 1),
    /// returning the removed exponent (0 for non-regular values).
    fn take_exponent(&mut self) -> i64;

    /// Step one ulp away from zero at the value's current precision.
    fn add_one_ulp(&mut self);

    /// Step one ulp toward zero; infinities step to the largest finite value.
    fn sub_one_ulp(&mut self);
}

impl ScalarExt for Float {
    fn signed_zero(prec: u32, negative: bool) -> Self {
        let mut zero = Float::new(prec);
        zero.set_zero(negative);
        zero
    }

    fn set_zero(&mut self, negative: bool) {
        self.assign(if negative {
            Special::NegZero
        } else {
            Special::Zero
        });
    }

    fn set_inf(&mut self, negative: bool) {
        self.assign(if negative {
            Special::NegInfinity
        } else {
            Special::Infinity
        });
    }

    fn set_nan(&mut self) {
        self.assign(Special::Nan);
    }

    fn class(&self) -> ScalarClass {
        if self.is_nan() {
            ScalarClass::Nan
        } else if self.is_infinite() {
            ScalarClass::Infinite
        } else if self.is_zero() {
            ScalarClass::Zero
        } else {
            ScalarClass::Finite
        }
    }

    fn sign(&self) -> i32 {
        match self.cmp0() {
            Some(Ordering::Less) => -1,
            Some(Ordering::Greater) => 1,
            _ => 0,
        }
    }

    fn exponent(&self) -> Option<i64> {
        self.get_exp().map(i64::from)
    }

    fn take_exponent(&mut self) -> i64 {
        match self.get_exp() {
            Some(exp) => {
                *self >>= exp;
                i64::from(exp)
            }
            None => 0,
        }
    }

    fn add_one_ulp(&mut self) {
        if self.is_sign_negative() {
            self.next_down();
        } else {
            self.next_up();
        }
    }

    fn sub_one_ulp(&mut self) {
        if self.is_sign_negative() {
            self.next_up();
        } else {
            self.next_down();
        }
    }
}

/// Clamp a computed precision into the range the scalar type accepts.
pub fn clamp_prec(prec: i64) -> u32 {
    let min = i64::from(float::prec_min());
    let max = i64::from(float::prec_max());
    prec.clamp(min, max) as u32
}

/// `a * b` without rounding: the product fits in the sum of the precisions.
pub fn exact_mul(a: &Float, b: &Float) -> Float {
    let prec = i64::from(a.prec()) + i64::from(b.prec());
    Float::with_val(clamp_prec(prec), a * b)
}

/// `a + b` without rounding, sized to span both operands' significant bits.
pub fn exact_add(a: &Float, b: &Float) -> Float {
    Float::with_val(exact_sum_prec(a, b), a + b)
}

/// `a - b` without rounding.
pub fn exact_sub(a: &Float, b: &Float) -> Float {
    Float::with_val(exact_sum_prec(a, b), a - b)
}

fn exact_sum_prec(a: &Float, b: &Float) -> u32 {
    let prec = match (a.exponent(), b.exponent()) {
        (Some(ea), Some(eb)) => {
            let top = ea.max(eb);
            let bottom = (ea - i64::from(a.prec())).min(eb - i64::from(b.prec()));
            // one more bit for the carry
            top - bottom + 1
        }
        _ => i64::from(a.prec().max(b.prec())),
    };
    clamp_prec(prec)
}
