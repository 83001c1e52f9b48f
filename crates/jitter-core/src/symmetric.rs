use crate::error::JitterError;
use crate::params;
use crate::random::{RandomSource, ThreadRandom, ensure_random};

/// Percentage applied when the caller does not pass a factor.
pub const DEFAULT_FACTOR: f64 = 0.2;

/// Symmetric jitter: perturb `delay` by up to `factor * delay` in either direction.
///
/// `factor` defaults to [`DEFAULT_FACTOR`] and must lie in `[0, 1]`. The result
/// is clamped at zero, so it is never negative. A sample of `0.5` yields `delay`
/// exactly.
pub fn add_jitter(delay: f64, factor: Option<f64>) -> Result<f64, JitterError> {
    add_jitter_with(delay, factor, ThreadRandom)
}

/// [`add_jitter`] drawing from a caller-supplied source.
pub fn add_jitter_with(
    delay: f64,
    factor: Option<f64>,
    mut random: impl RandomSource,
) -> Result<f64, JitterError> {
    let delay = params::non_negative("delay", delay)?;
    let factor = params::unit_factor("factor", factor.unwrap_or(DEFAULT_FACTOR))?;
    let sample = ensure_random(&mut random)?;
    // Maps the sample onto [-1, 1).
    let jitter = delay * factor * (sample * 2.0 - 1.0);
    Ok(params::saturate((delay + jitter).max(0.0)))
}
