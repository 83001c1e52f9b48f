use serde::{Deserialize, Serialize};
use thiserror::Error;

use jitter_core::{
    DEFAULT_FACTOR, DEFAULT_MULTIPLIER, JitterError, RandomSource, add_decorrelated_jitter_with,
    add_equal_jitter_with, add_fixed_jitter_with, add_full_jitter_with, add_jitter_with, params,
};

const DEFAULT_BASE_DELAY_MS: f64 = 100.0;
const DEFAULT_MAX_DELAY_MS: f64 = 30_000.0;

/// Jitter algorithm selected by a policy, with its parameters.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JitterStrategy {
    /// Leave the delay untouched.
    None,
    Full,
    Equal,
    Fixed {
        max_jitter_ms: f64,
    },
    Symmetric {
        #[serde(default = "default_factor")]
        factor: f64,
    },
    Decorrelated {
        base_ms: f64,
        cap_ms: f64,
        #[serde(default = "default_multiplier")]
        multiplier: f64,
    },
}

fn default_factor() -> f64 {
    DEFAULT_FACTOR
}

fn default_multiplier() -> f64 {
    DEFAULT_MULTIPLIER
}

impl JitterStrategy {
    /// Check the strategy's own parameters without drawing a sample.
    pub fn validate(&self) -> Result<(), JitterError> {
        match *self {
            JitterStrategy::None | JitterStrategy::Full | JitterStrategy::Equal => {}
            JitterStrategy::Fixed { max_jitter_ms } => {
                params::non_negative("max_jitter", max_jitter_ms)?;
            }
            JitterStrategy::Symmetric { factor } => {
                params::unit_factor("factor", factor)?;
            }
            JitterStrategy::Decorrelated {
                base_ms,
                cap_ms,
                multiplier,
            } => {
                params::non_negative("base_delay", base_ms)?;
                params::non_negative("cap", cap_ms)?;
                params::positive("multiplier", multiplier)?;
            }
        }
        Ok(())
    }

    /// Jitter `delay_ms`.
    ///
    /// For [`JitterStrategy::Decorrelated`], `delay_ms` is the previous delay
    /// the next one is derived from.
    pub fn apply(&self, delay_ms: f64, random: impl RandomSource) -> Result<f64, JitterError> {
        match *self {
            JitterStrategy::None => params::non_negative("delay", delay_ms),
            JitterStrategy::Full => add_full_jitter_with(delay_ms, random),
            JitterStrategy::Equal => add_equal_jitter_with(delay_ms, random),
            JitterStrategy::Fixed { max_jitter_ms } => {
                add_fixed_jitter_with(delay_ms, max_jitter_ms, random)
            }
            JitterStrategy::Symmetric { factor } => add_jitter_with(delay_ms, Some(factor), random),
            JitterStrategy::Decorrelated {
                base_ms,
                cap_ms,
                multiplier,
            } => add_decorrelated_jitter_with(base_ms, delay_ms, cap_ms, random, Some(multiplier)),
        }
    }
}

/// Named policy stored in the [`PolicyConfig`](PolicyConfig).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PolicyRef {
    pub name: String,
    pub jitter: JitterStrategy,
    /// Attempt-based strategies only; decorrelated jitter carries its own base.
    #[serde(default)]
    pub base_delay_ms: Option<f64>,
    #[serde(default)]
    pub max_delay_ms: Option<f64>,
}

impl PolicyRef {
    /// Nominal delay of the first attempt, in milliseconds.
    pub fn base_delay(&self) -> f64 {
        self.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS)
    }

    /// Upper bound for any computed delay, in milliseconds.
    pub fn max_delay(&self) -> f64 {
        self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS)
    }

    pub(crate) fn validate(&self) -> Result<(), JitterError> {
        self.jitter.validate()?;
        params::non_negative("base_delay_ms", self.base_delay())?;
        params::non_negative("max_delay_ms", self.max_delay())?;
        Ok(())
    }
}

/// Policy configuration file structure.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PolicyConfig {
    pub policies: Vec<PolicyRef>,
}

/// Errors surfaced by the policy layer.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy `{0}` not found")]
    PolicyNotFound(String),
    #[error("duplicate policy name `{0}`")]
    DuplicatePolicy(String),
    #[error("policy `{name}` is invalid: {source}")]
    InvalidPolicy {
        name: String,
        #[source]
        source: JitterError,
    },
    #[error("policy `{name}` {reason}")]
    StrategyMismatch { name: String, reason: &'static str },
    #[error(transparent)]
    Jitter(#[from] JitterError),
    #[error(transparent)]
    Config(#[from] serde_yaml_bw::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PolicyError {
    pub fn policy_not_found(name: impl Into<String>) -> Self {
        PolicyError::PolicyNotFound(name.into())
    }

    pub fn strategy_mismatch(name: impl Into<String>, reason: &'static str) -> Self {
        PolicyError::StrategyMismatch {
            name: name.into(),
            reason,
        }
    }

    pub fn invalid_policy(name: impl Into<String>, source: JitterError) -> Self {
        PolicyError::InvalidPolicy {
            name: name.into(),
            source,
        }
    }
}
