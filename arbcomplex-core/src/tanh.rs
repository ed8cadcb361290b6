//! Complex hyperbolic tangent.
//!
//! `tanh(z) = -i tan(iz) = conj(-i tan(conj(-i z)))`. Both `conj(-i z)` and
//! `conj(-i w)` just exchange real and imaginary parts, so the tangent is
//! evaluated on the operand's components in swapped order, into the output
//! with its components swapped, under the swapped rounding pair.

use crate::complex::BigComplex;
use crate::rounding::{InexactCode, RoundingPair};
use crate::tan::tan_parts;

/// `rop = tanh(op)`, correctly rounded per component.
pub fn tanh(rop: &mut BigComplex, op: &BigComplex, rnd: RoundingPair) -> InexactCode {
    rop.swap_parts();
    let inex = tan_parts(rop, &op.im, &op.re, rnd.swapped());
    rop.swap_parts();
    inex.swapped()
}
