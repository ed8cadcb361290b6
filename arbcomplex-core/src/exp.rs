//! Complex exponential: `exp(x + iy) = e^x cos y + i e^x sin y`.

use crate::complex::BigComplex;
use crate::precision::{next_working_precision, round_settled, settled};
use crate::rounding::{InexactCode, RoundingPair};
use crate::scalar::ScalarExt;
use crate::special;
use rug::ops::NegAssign;
use rug::{Assign, Float};

/// `rop = exp(op)`, correctly rounded per component.
///
/// Magnitudes beyond the exponent range round as overflow or underflow in the
/// requested direction: away from zero to a signed infinity or the smallest
/// magnitude, toward zero to the largest finite magnitude or a signed zero.
pub fn exp(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    if let Some(inex) = special::exp(rop, op, rnd) {
        return inex;
    }

    let mut prec = rop.max_prec();
    loop {
        prec = next_working_precision(prec, 6);

        let e = Float::with_val(prec, op.re.exp_ref());
        let (mut s, mut c) = (Float::new(prec), Float::new(prec));
        (&mut s, &mut c).assign(op.im.sin_cos_ref());
        let (re, im, err) = if e.is_normal() {
            let re = Float::with_val(prec, &e * &c);
            let im = Float::with_val(prec, &e * &s);
            (re, im, i64::from(prec) - 3)
        } else {
            // e^x alone is out of range while e^x cos y or e^x sin y may not be
            let (re, err_re) = exp_times(&op.re, &c, prec);
            let (im, err_im) = exp_times(&op.re, &s, prec);
            (re, im, err_re.min(err_im))
        };

        let ready = settled(&re, err, rnd.re(), rop.prec_re())
            && settled(&im, err, rnd.im(), rop.prec_im());
        if ready {
            let inex_re = round_settled(&mut rop.re, &re, rnd.re());
            let inex_im = round_settled(&mut rop.im, &im, rnd.im());
            return InexactCode::new(inex_re, inex_im);
        }
        log::trace!("exp: {prec} bits not enough");
    }
}

/// `e^x * f` as `sign(f) e^(x + log|f|)`, with its error exponent.
///
/// With `f` itself rounded, the argument carries an absolute error below
/// `2^(E - prec + 1)`, `E` the larger exponent of the sum and the logarithm,
/// which `exp` turns into a relative error below `2^(E - prec + 3)` once the
/// final rounding is counted.
fn exp_times(x: &Float, f: &Float, prec: u32) -> (Float, i64) {
    let ln = Float::with_val(prec, f.as_abs().ln_ref());
    let arg = Float::with_val(prec, x + &ln);
    let mut out = Float::with_val(prec, arg.exp_ref());
    if f.is_sign_negative() {
        out.neg_assign();
    }
    let mag = arg.exponent().unwrap_or(0).max(ln.exponent().unwrap_or(0)).max(1);
    (out, i64::from(prec) - mag - 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::float::Constant;
    use std::cmp::Ordering;

    #[test]
    fn exp_of_i_pi_is_minus_one() {
        let pi = Float::with_val(256, Constant::Pi);
        let op = BigComplex::from_parts(Float::new(256), pi);
        let mut z = BigComplex::new(53);
        exp(&mut z, &op, RoundingPair::NN);
        // the imaginary part is sin(pi rounded), tiny but nonzero
        assert_eq!(z.re, -1);
        assert!(z.im.is_normal() && z.im.get_exp().unwrap_or(0) < -200);
    }

    #[test]
    fn exp_of_real_is_real_exponential() {
        let op = BigComplex::with_val(53, 1, 0);
        let mut z = BigComplex::new(53);
        let inex = exp(&mut z, &op, RoundingPair::NN);
        assert_eq!(z.re, Float::with_val(53, Float::with_val(53, 1).exp_ref()));
        assert!(z.im.is_zero() && z.im.is_sign_positive());
        assert_eq!(inex.im(), Ordering::Equal);
    }

    #[test]
    fn generic_operand_matches_high_precision_reference() {
        let op = BigComplex::with_val(53, 0.75, -1.5);
        let mut z = BigComplex::new(40);
        exp(&mut z, &op, RoundingPair::DU);

        let e = Float::with_val(300, op.re.exp_ref());
        let re = Float::with_val(300, &e * Float::with_val(300, op.im.cos_ref()));
        let im = Float::with_val(300, &e * Float::with_val(300, op.im.sin_ref()));
        let (re40, _) = Float::with_val_round(40, &re, rug::float::Round::Down);
        let (im40, _) = Float::with_val_round(40, &im, rug::float::Round::Up);
        assert_eq!(z.re, re40);
        assert_eq!(z.im, im40);
    }

    #[test]
    fn huge_real_part_saturates() {
        let mut x = Float::with_val(53, 1);
        x <<= 62;
        let op = BigComplex::from_parts(x, Float::with_val(53, 2));
        let mut z = BigComplex::new(53);
        let inex = exp(&mut z, &op, RoundingPair::NN);
        // cos 2 < 0 < sin 2
        assert!(z.re.is_infinite() && z.re.is_sign_negative());
        assert!(z.im.is_infinite() && z.im.is_sign_positive());
        assert_eq!(inex.re(), Ordering::Less);
        assert_eq!(inex.im(), Ordering::Greater);
    }

    #[test]
    fn overflow_toward_zero_stays_finite() {
        let mut x = Float::with_val(53, 1);
        x <<= 62;
        let op = BigComplex::from_parts(x, Float::with_val(53, 2));
        let mut z = BigComplex::new(53);
        let inex = exp(&mut z, &op, RoundingPair::ZZ);
        assert!(z.re.is_finite() && z.re.is_sign_negative());
        assert!(z.im.is_finite() && z.im.is_sign_positive());
        assert_eq!(z.re.get_exp(), Some(rug::float::exp_max()));
        assert_eq!(inex.re(), Ordering::Greater);
        assert_eq!(inex.im(), Ordering::Less);
    }

    #[test]
    fn product_in_range_survives_overflowing_exponential() {
        // e^x overflows by a factor e, cos y is about 2^-25
        let emax = rug::float::exp_max();
        let ln2 = Float::with_val(300, Constant::Log2);
        let x = Float::with_val(64, &ln2 * emax) + 1u32;
        let y = Float::with_val(64, 1.5707963);
        let op = BigComplex::from_parts(x.clone(), y.clone());
        let mut z = BigComplex::new(53);
        exp(&mut z, &op, RoundingPair::NN);

        let reduced = Float::with_val(300, &x - Float::with_val(300, &ln2 * emax));
        let scaled = Float::with_val(300, reduced.exp_ref()) * Float::with_val(300, y.cos_ref());
        let mut expected = Float::with_val(53, &scaled);
        expected <<= emax;
        assert!(z.re.is_finite());
        assert_eq!(z.re, expected);
        assert!(z.im.is_infinite() && z.im.is_sign_positive());
    }
}
