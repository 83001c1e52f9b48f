use crate::error::JitterError;
use crate::params;
use crate::random::{RandomSource, ThreadRandom, ensure_random};

/// Equal jitter: half of `delay` is kept, the other half is randomized.
///
/// The result lies in `[delay / 2, delay)`, so retries never cluster at zero.
pub fn add_equal_jitter(delay: f64) -> Result<f64, JitterError> {
    add_equal_jitter_with(delay, ThreadRandom)
}

/// [`add_equal_jitter`] drawing from a caller-supplied source.
pub fn add_equal_jitter_with(delay: f64, mut random: impl RandomSource) -> Result<f64, JitterError> {
    let delay = params::non_negative("delay", delay)?;
    let half = delay / 2.0;
    let sample = ensure_random(&mut random)?;
    Ok(half + half * sample)
}
