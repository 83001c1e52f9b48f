//! Randomized backoff delays ("jitter") for retrying clients.
//!
//! Each algorithm validates its parameters, draws exactly one sample through
//! [`ensure_random`], and returns a delay in milliseconds. Nothing is cached
//! between calls, so the functions are safe to call from any thread as long as
//! the supplied [`RandomSource`] is.

mod decorrelated;
mod equal;
mod error;
mod fixed;
mod full;
pub mod params;
pub mod random;
mod symmetric;

pub use decorrelated::{DEFAULT_MULTIPLIER, add_decorrelated_jitter, add_decorrelated_jitter_with};
pub use equal::{add_equal_jitter, add_equal_jitter_with};
pub use error::JitterError;
pub use fixed::{add_fixed_jitter, add_fixed_jitter_with};
pub use full::{add_full_jitter, add_full_jitter_with};
pub use random::{
    DEFAULT_LABEL, RandomSource, RngSource, ThreadRandom, ensure_random, ensure_random_named,
};
pub use symmetric::{DEFAULT_FACTOR, add_jitter, add_jitter_with};
