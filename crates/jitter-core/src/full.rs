use crate::error::JitterError;
use crate::params;
use crate::random::{RandomSource, ThreadRandom, ensure_random};

/// Full jitter: a uniform delay in `[0, delay)`.
///
/// Gives the widest spread and removes correlation between retrying clients.
pub fn add_full_jitter(delay: f64) -> Result<f64, JitterError> {
    add_full_jitter_with(delay, ThreadRandom)
}

/// [`add_full_jitter`] drawing from a caller-supplied source.
pub fn add_full_jitter_with(delay: f64, mut random: impl RandomSource) -> Result<f64, JitterError> {
    let delay = params::non_negative("delay", delay)?;
    let sample = ensure_random(&mut random)?;
    Ok(delay * sample)
}
