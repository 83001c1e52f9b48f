//! Random-source contract and the validator every jitter algorithm draws through.
//!
//! A sample must be finite and lie in the half-open interval `[0, 1)`, the same
//! range `rand`'s standard `f64` distribution produces. A source returning
//! exactly `1.0` is rejected; consequently no algorithm reaches its exclusive
//! upper bound unless a clamp applies.

use rand::Rng;

use crate::error::JitterError;

/// Label used in error messages when the caller does not name the source.
pub const DEFAULT_LABEL: &str = "random";

/// Supplier of one uniform sample in `[0, 1)` per call.
///
/// Any `FnMut() -> f64` closure is a source, which keeps fixed-output sources
/// in tests down to `|| 0.5`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Default source backed by the thread-local `rand` generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Adapter turning any [`rand::Rng`] into a [`RandomSource`].
///
/// Wrap `&mut rng` to keep using a seeded generator across calls.
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Draw one sample from `random` and check it against the `[0, 1)` contract.
pub fn ensure_random<R>(random: &mut R) -> Result<f64, JitterError>
where
    R: RandomSource + ?Sized,
{
    ensure_random_named(random, DEFAULT_LABEL)
}

/// Like [`ensure_random`], naming the source as `label` in errors.
///
/// The source is invoked exactly once; an invalid sample is a hard failure.
pub fn ensure_random_named<R>(random: &mut R, label: &str) -> Result<f64, JitterError>
where
    R: RandomSource + ?Sized,
{
    let value = random.next_unit();
    if value.is_finite() && (0.0..1.0).contains(&value) {
        // Folds -0.0 into +0.0.
        Ok(value + 0.0)
    } else {
        tracing::debug!(label, value, "random source produced an out-of-range sample");
        Err(JitterError::invalid_random_source(label, value))
    }
}
