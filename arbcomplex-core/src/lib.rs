pub mod complex;
pub mod config;
pub mod div;
pub mod error;
pub mod exp;
pub mod log;
pub mod mul;
pub mod precision;
pub mod rounding;
pub mod scalar;
mod sin_cos;
mod special;
pub mod tan;
pub mod tanh;

pub use complex::{add, conj, mul_fr, mul_i, neg, set, sub, BigComplex};
pub use config::{ComplexConfig, DEFAULT_CONFIG};
pub use div::div;
pub use error::ConfigError;
pub use exp::exp;
pub use self::log::log;
pub use mul::{
    mul, mul_imag, mul_karatsuba, mul_naive, mul_naive_overflow, mul_real, mul_with_threshold,
    sqr, MUL_KARATSUBA_THRESHOLD,
};
pub use precision::{can_round, ceil_log2, next_working_precision};
pub use rounding::{InexactCode, RoundingMode, RoundingPair};
pub use scalar::{Scalar, ScalarClass, ScalarExt};
pub use tan::tan;
pub use tanh::tanh;
