//! Named jitter policies and retry delay helpers built on [`jitter_core`].
//!
//! Everything here computes delays only: policy documents arrive as strings the
//! caller has already read, and sleeping on the result is left to the caller's
//! timer.

pub mod config;
pub mod policy_map;
pub mod retry;
pub mod types;

pub use config::ConfigFormat;
pub use jitter_core::{
    DEFAULT_FACTOR, DEFAULT_MULTIPLIER, JitterError, RandomSource, RngSource, ThreadRandom,
    add_decorrelated_jitter, add_decorrelated_jitter_with, add_equal_jitter, add_equal_jitter_with,
    add_fixed_jitter, add_fixed_jitter_with, add_full_jitter, add_full_jitter_with, add_jitter,
    add_jitter_with, ensure_random, ensure_random_named,
};
pub use policy_map::PolicyMap;
pub use retry::{DecorrelatedSequence, as_duration, exponential_delay_ms};
pub use types::{JitterStrategy, PolicyConfig, PolicyError, PolicyRef};
