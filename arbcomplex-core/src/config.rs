//! Precision and algorithm-selection configuration.
//!
//! A [`ComplexConfig`] carries the knobs a caller may want to tune: default
//! component precisions for freshly created values and the size at which
//! multiplication switches to the Karatsuba scheme. [`DEFAULT_CONFIG`] is the
//! canonical set of values; alternatives can be loaded from JSON.

use crate::error::ConfigError;
use crate::mul::MUL_KARATSUBA_THRESHOLD;
use rug::float;
use serde::{Deserialize, Serialize};

/// Tunable parameters for complex arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexConfig {
    /// Precision in bits of the real part of new values.
    pub default_precision_re: u32,
    /// Precision in bits of the imaginary part of new values.
    pub default_precision_im: u32,
    /// Karatsuba is considered once the larger operand precision exceeds this.
    pub karatsuba_threshold_bits: u32,
}

/// Double precision components and the tuned multiplication threshold.
pub static DEFAULT_CONFIG: ComplexConfig = ComplexConfig {
    default_precision_re: 53,
    default_precision_im: 53,
    karatsuba_threshold_bits: MUL_KARATSUBA_THRESHOLD,
};

impl Default for ComplexConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl ComplexConfig {
    /// Check that every precision is one the scalar type accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_precision("default_precision_re", self.default_precision_re)?;
        check_precision("default_precision_im", self.default_precision_im)?;
        if self.karatsuba_threshold_bits == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ComplexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_precision(field: &'static str, value: u32) -> Result<(), ConfigError> {
    let (min, max) = (float::prec_min(), float::prec_max());
    if value < min || value > max {
        return Err(ConfigError::PrecisionOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DEFAULT_CONFIG.validate().is_ok());
        assert_eq!(ComplexConfig::default().karatsuba_threshold_bits, 23 * 64);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ComplexConfig::from_json(r#"{ "default_precision_re": 256 }"#).unwrap();
        assert_eq!(config.default_precision_re, 256);
        assert_eq!(config.default_precision_im, 53);
        assert_eq!(config.karatsuba_threshold_bits, MUL_KARATSUBA_THRESHOLD);
    }

    #[test]
    fn zero_precision_is_rejected() {
        let err = ComplexConfig::from_json(r#"{ "default_precision_im": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PrecisionOutOfRange {
                field: "default_precision_im",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ComplexConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn json_round_trip() {
        let config = ComplexConfig {
            default_precision_re: 128,
            default_precision_im: 64,
            karatsuba_threshold_bits: 4096,
        };
        let json = config.to_json().unwrap();
        assert_eq!(ComplexConfig::from_json(&json).unwrap(), config);
    }
}
