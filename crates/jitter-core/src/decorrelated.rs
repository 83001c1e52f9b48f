use crate::error::JitterError;
use crate::params;
use crate::random::{RandomSource, ThreadRandom, ensure_random};

/// Growth applied to the previous delay when the caller does not pass one.
pub const DEFAULT_MULTIPLIER: f64 = 3.0;

/// Decorrelated jitter: derive the next delay from the previous one.
///
/// Samples uniformly from `[base_delay, max(base_delay, previous_delay * multiplier)]`
/// and clamps the result to `cap`. Behaviour at the edges:
///
/// - if `previous_delay * multiplier < base_delay` the interval collapses to `base_delay`;
/// - if `base_delay > cap` every result is `cap`, so keep `cap >= base_delay`;
/// - when the interval extends past `cap`, the excess folds onto `cap`.
///
/// ```
/// use jitter_core::add_decorrelated_jitter;
///
/// let mut delay = add_decorrelated_jitter(100.0, 100.0, 10_000.0)?;
/// for _ in 0..5 {
///     delay = add_decorrelated_jitter(100.0, delay, 10_000.0)?;
///     assert!((100.0..=10_000.0).contains(&delay));
/// }
/// # Ok::<(), jitter_core::JitterError>(())
/// ```
pub fn add_decorrelated_jitter(
    base_delay: f64,
    previous_delay: f64,
    cap: f64,
) -> Result<f64, JitterError> {
    add_decorrelated_jitter_with(base_delay, previous_delay, cap, ThreadRandom, None)
}

/// [`add_decorrelated_jitter`] with a caller-supplied source and optional
/// multiplier (defaults to [`DEFAULT_MULTIPLIER`]).
pub fn add_decorrelated_jitter_with(
    base_delay: f64,
    previous_delay: f64,
    cap: f64,
    mut random: impl RandomSource,
    multiplier: Option<f64>,
) -> Result<f64, JitterError> {
    let base_delay = params::non_negative("base_delay", base_delay)?;
    let previous_delay = params::non_negative("previous_delay", previous_delay)?;
    let cap = params::non_negative("cap", cap)?;
    let multiplier = params::positive("multiplier", multiplier.unwrap_or(DEFAULT_MULTIPLIER))?;

    let upper = base_delay.max(params::saturate(previous_delay * multiplier));
    let sample = ensure_random(&mut random)?;
    let candidate = base_delay + (upper - base_delay) * sample;
    Ok(cap.min(candidate))
}
