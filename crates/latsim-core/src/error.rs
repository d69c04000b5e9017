use thiserror::Error;

/// Configuration errors raised before any sampling or closed-form math runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(
        "unstable queue: arrival rate {arrival_rate} must be below service rate {service_rate}"
    )]
    UnstableQueue { arrival_rate: f64, service_rate: f64 },

    #[error("invalid rate `{name}`: {value} (must be positive and finite)")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("invalid probability `{name}`: {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("invalid parameter `{name}`: {value} (must be non-negative and finite)")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, SimError>;

pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidRate { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Accepts `value` in `[0, 1]`, or `[0, 1)` when `allow_one` is false.
pub(crate) fn check_probability(name: &'static str, value: f64, allow_one: bool) -> Result<f64> {
    let in_range = value >= 0.0 && (value < 1.0 || (allow_one && value == 1.0));
    if in_range {
        Ok(value)
    } else {
        Err(SimError::InvalidProbability { name, value })
    }
}
