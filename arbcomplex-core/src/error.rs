use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside the supported precision range [{min}, {max}]")]
    PrecisionOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Karatsuba threshold must be positive")]
    ZeroThreshold,

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
