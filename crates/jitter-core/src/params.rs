//! Domain checks shared by every jitter algorithm.

use crate::error::JitterError;

const NON_NEGATIVE: &str = "a non-negative finite number";
const UNIT_FACTOR: &str = "a finite number in [0, 1]";
const POSITIVE: &str = "a positive finite number";

/// Accept a finite value `>= 0`, returning `-0.0` as `+0.0`.
pub fn non_negative(name: &'static str, value: f64) -> Result<f64, JitterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value + 0.0)
    } else {
        Err(JitterError::invalid_parameter(name, NON_NEGATIVE, value))
    }
}

/// Accept a finite value in `[0, 1]`, bounds included.
pub fn unit_factor(name: &'static str, value: f64) -> Result<f64, JitterError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(JitterError::invalid_parameter(name, UNIT_FACTOR, value))
    }
}

/// Accept a finite value `> 0`.
pub fn positive(name: &'static str, value: f64) -> Result<f64, JitterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(JitterError::invalid_parameter(name, POSITIVE, value))
    }
}

/// Clamp an overflowed sum back into the finite range.
pub(crate) fn saturate(value: f64) -> f64 {
    value.min(f64::MAX)
}
