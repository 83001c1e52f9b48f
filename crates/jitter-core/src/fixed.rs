use crate::error::JitterError;
use crate::params;
use crate::random::{RandomSource, ThreadRandom, ensure_random};

/// Fixed jitter: add up to `max_jitter` milliseconds on top of `delay`.
///
/// The added randomness is bounded in absolute terms, independent of `delay`.
/// The result lies in `[delay, delay + max_jitter)`.
pub fn add_fixed_jitter(delay: f64, max_jitter: f64) -> Result<f64, JitterError> {
    add_fixed_jitter_with(delay, max_jitter, ThreadRandom)
}

/// [`add_fixed_jitter`] drawing from a caller-supplied source.
pub fn add_fixed_jitter_with(
    delay: f64,
    max_jitter: f64,
    mut random: impl RandomSource,
) -> Result<f64, JitterError> {
    let delay = params::non_negative("delay", delay)?;
    let max_jitter = params::non_negative("max_jitter", max_jitter)?;
    let sample = ensure_random(&mut random)?;
    Ok(params::saturate(delay + max_jitter * sample))
}
