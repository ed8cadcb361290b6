//! Complex number with independently precisioned components.
//!
//! Every operation writes into a caller-provided output and rounds each
//! component to that output's own precision. Free functions take the output by
//! `&mut` and operands by `&`, so Rust's borrow rules keep them disjoint; the
//! `*_assign` methods cover the in-place case by snapshotting the receiver
//! before the first write.

use crate::config::ComplexConfig;
use crate::rounding::{InexactCode, RoundingPair};
use crate::scalar::ScalarExt;
use rug::ops::AssignRound;
use rug::{Assign, Float};
use std::cmp::Ordering;

/// Arbitrary precision complex number: `re + i*im`.
///
/// The halves are observed independently; there is no combined "complex
/// infinity" state beyond what each component holds.
#[derive(Clone, Debug, PartialEq)]
pub struct BigComplex {
    pub re: Float,
    pub im: Float,
}

impl BigComplex {
    /// `+0 + i*(+0)` with both components at `prec` bits.
    pub fn new(prec: u32) -> Self {
        Self::with_prec(prec, prec)
    }

    /// `+0 + i*(+0)` with separate component precisions.
    pub fn with_prec(prec_re: u32, prec_im: u32) -> Self {
        Self {
            re: Float::new(prec_re),
            im: Float::new(prec_im),
        }
    }

    /// Zero at the precisions named by a configuration.
    pub fn from_config(config: &ComplexConfig) -> Self {
        Self::with_prec(config.default_precision_re, config.default_precision_im)
    }

    /// Both components at `prec` bits, rounded to nearest from the given values.
    pub fn with_val<R, I>(prec: u32, re: R, im: I) -> Self
    where
        Float: Assign<R> + Assign<I>,
    {
        Self {
            re: Float::with_val(prec, re),
            im: Float::with_val(prec, im),
        }
    }

    pub fn from_parts(re: Float, im: Float) -> Self {
        Self { re, im }
    }

    pub fn into_parts(self) -> (Float, Float) {
        (self.re, self.im)
    }

    pub fn prec_re(&self) -> u32 {
        self.re.prec()
    }

    pub fn prec_im(&self) -> u32 {
        self.im.prec()
    }

    pub fn max_prec(&self) -> u32 {
        self.prec_re().max(self.prec_im())
    }

    /// Change both precisions, rounding the current value to nearest.
    pub fn set_prec(&mut self, prec: u32) {
        self.re.set_prec(prec);
        self.im.set_prec(prec);
    }

    /// True if either component is NaN.
    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// True if either component is infinite, whatever the other holds.
    pub fn is_infinite(&self) -> bool {
        self.re.is_infinite() || self.im.is_infinite()
    }

    /// True if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn set_nan(&mut self) {
        self.re.set_nan();
        self.im.set_nan();
    }

    /// Exchange real and imaginary components in place. Significands move,
    /// they are not copied.
    pub fn swap_parts(&mut self) {
        std::mem::swap(&mut self.re, &mut self.im);
    }

    /// Bitwise-style identity: equal values and equal zero signs per component.
    pub fn same_value(&self, other: &Self) -> bool {
        fn same(a: &Float, b: &Float) -> bool {
            (a.is_nan() && b.is_nan())
                || (a == b && a.is_sign_negative() == b.is_sign_negative())
        }
        same(&self.re, &other.re) && same(&self.im, &other.im)
    }

    // ------------------------------------------------------------------
    // In-place forms: the receiver is both operand and output.
    // ------------------------------------------------------------------

    pub fn add_assign_round(&mut self, rhs: &Self, rnd: RoundingPair) -> InexactCode {
        let lhs = self.clone();
        add(self, &lhs, rhs, rnd)
    }

    pub fn sub_assign_round(&mut self, rhs: &Self, rnd: RoundingPair) -> InexactCode {
        let lhs = self.clone();
        sub(self, &lhs, rhs, rnd)
    }

    pub fn mul_assign_round(&mut self, rhs: &Self, rnd: RoundingPair) -> InexactCode {
        let lhs = self.clone();
        crate::mul::mul(self, &lhs, rhs, rnd)
    }

    pub fn div_assign_round(&mut self, rhs: &Self, rnd: RoundingPair) -> InexactCode {
        let lhs = self.clone();
        crate::div::div(self, &lhs, rhs, rnd)
    }

    pub fn square_assign_round(&mut self, rnd: RoundingPair) -> InexactCode {
        let op = self.clone();
        crate::mul::sqr(self, &op, rnd)
    }

    pub fn exp_assign_round(&mut self, rnd: RoundingPair) -> InexactCode {
        let op = self.clone();
        crate::exp::exp(self, &op, rnd)
    }

    pub fn log_assign_round(&mut self, rnd: RoundingPair) -> InexactCode {
        let op = self.clone();
        crate::log::log(self, &op, rnd)
    }

    pub fn tan_assign_round(&mut self, rnd: RoundingPair) -> InexactCode {
        let op = self.clone();
        crate::tan::tan(self, &op, rnd)
    }

    pub fn tanh_assign_round(&mut self, rnd: RoundingPair) -> InexactCode {
        let op = self.clone();
        crate::tanh::tanh(self, &op, rnd)
    }
}

/// `rop = op`, rounded into `rop`'s precisions.
pub fn set(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(&op.re, rnd.re().into());
    let inex_im = rop.im.assign_round(&op.im, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = -op`.
pub fn neg(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(-&op.re, rnd.re().into());
    let inex_im = rop.im.assign_round(-&op.im, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = conj(op)`.
pub fn conj(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(&op.re, rnd.re().into());
    let inex_im = rop.im.assign_round(-&op.im, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = a + b`.
pub fn add(rop: &mut BigComplex, a: &BigComplex, b: &BigComplex, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(&a.re + &b.re, rnd.re().into());
    let inex_im = rop.im.assign_round(&a.im + &b.im, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = a - b`.
pub fn sub(rop: &mut BigComplex, a: &BigComplex, b: &BigComplex, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(&a.re - &b.re, rnd.re().into());
    let inex_im = rop.im.assign_round(&a.im - &b.im, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = x * r` for a real scalar `r`.
pub fn mul_fr(rop: &mut BigComplex, x: &BigComplex, r: &Float, rnd: RoundingPair) -> InexactCode {
    let inex_re = rop.re.assign_round(&x.re * r, rnd.re().into());
    let inex_im = rop.im.assign_round(&x.im * r, rnd.im().into());
    InexactCode::new(inex_re, inex_im)
}

/// `rop = x * i`, or `x * (-i)` when `negative` is set.
pub fn mul_i(
    rop: &mut BigComplex,
    x: &BigComplex,
    negative: bool,
    rnd: RoundingPair,
) -> InexactCode {
    let (inex_re, inex_im): (Ordering, Ordering) = if negative {
        // (a + ib)(-i) = b - ia
        (
            rop.re.assign_round(&x.im, rnd.re().into()),
            rop.im.assign_round(-&x.re, rnd.im().into()),
        )
    } else {
        // (a + ib)i = -b + ia
        (
            rop.re.assign_round(-&x.im, rnd.re().into()),
            rop.im.assign_round(&x.re, rnd.im().into()),
        )
    };
    InexactCode::new(inex_re, inex_im)
}
