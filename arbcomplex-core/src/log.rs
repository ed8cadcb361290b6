//! Principal complex logarithm.
//!
//! `log(x + iy) = log|x + iy| + i*atan2(y, x)`. The imaginary part is one
//! correctly rounded scalar call. The real part is evaluated as
//! `log|x| + log1p((y/x)^2)/2` with `|x| >= |y|`, which neither overflows nor
//! cancels in the squaring, inside a loop that raises the working precision
//! until the result can be rounded.

use crate::complex::BigComplex;
use crate::precision::{can_round, next_working_precision};
use crate::rounding::{InexactCode, RoundingMode, RoundingPair};
use crate::scalar::ScalarExt;
use crate::special;
use rug::ops::AssignRound;
use rug::Float;
use std::cmp::Ordering;

/// `rop = log(op)`, correctly rounded per component.
pub fn log(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    if let Some(inex) = special::log(rop, op, rnd) {
        return inex;
    }

    let (x, y) = if op.re.cmp_abs(&op.im) == Some(Ordering::Less) {
        (&op.im, &op.re)
    } else {
        (&op.re, &op.im)
    };

    let mut prec = rop.prec_re();
    let mut loops = 0u32;
    let w = loop {
        loops += 1;
        prec = next_working_precision(prec, 4);

        // v = log1p((y/x)^2) / 2, within 10.54 ulp
        let mut v = Float::with_val(prec, y / x);
        v.square_mut();
        v.ln_1p_mut();
        v >>= 1;

        // w = log|x|, within half an ulp
        let mut w = Float::with_val(prec, x.as_abs().ln_ref());
        let expw = w.exponent().unwrap_or(0);
        w += &v;

        let err = if !w.is_sign_negative() {
            // v >= 0, no cancellation
            4
        } else {
            let exp_v = v.exponent().unwrap_or(0);
            let exp_w = w.exponent().unwrap_or(0);
            // error of v and of the old w, both restated in ulps of the sum
            (4 + exp_v)
                .max(4 + exp_v - exp_w)
                .max(-1 + expw - exp_w)
                + 2
        };

        if can_round(&w, i64::from(prec) - err, RoundingMode::Nearest, rnd.re(), rop.prec_re()) {
            break w;
        }
        log::trace!("log: round {loops} at {prec} bits failed, error {err} ulps (log2)");
    };

    let inex_im = rop.im.assign_round(op.im.atan2_ref(&op.re), rnd.im().into());
    let inex_re = rop.re.assign_round(&w, rnd.re().into());

    InexactCode::new(inex_re, inex_im)
}
