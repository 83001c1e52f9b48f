use std::time::Duration;

use jitter_core::{
    DEFAULT_MULTIPLIER, JitterError, RandomSource, add_decorrelated_jitter_with, params,
};

use crate::types::{JitterStrategy, PolicyError, PolicyRef};

const MAX_DOUBLINGS: u32 = 16;

/// Compute an exponential delay of `base_ms * 2^attempt`, clamped to `max_ms`.
///
/// `attempt` is zero-based and stops doubling after 16 attempts.
pub fn exponential_delay_ms(base_ms: f64, attempt: u32, max_ms: f64) -> Result<f64, JitterError> {
    let base_ms = params::non_negative("base_delay_ms", base_ms)?;
    let max_ms = params::non_negative("max_delay_ms", max_ms)?;
    let factor = f64::from(1u32 << attempt.min(MAX_DOUBLINGS));
    Ok((base_ms * factor).min(max_ms))
}

/// Convert a millisecond delay into a [`Duration`] for the caller's timer.
///
/// Negative and NaN inputs map to zero; values beyond `Duration::MAX` saturate.
pub fn as_duration(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1_000.0).unwrap_or(Duration::MAX)
}

impl PolicyRef {
    /// Jittered delay for a zero-based `attempt`, clamped to [`PolicyRef::max_delay`].
    ///
    /// The exponential delay for the attempt is the nominal delay handed to the
    /// strategy. Decorrelated policies derive each delay from the previous one
    /// rather than from the attempt count, so they are rejected here; use
    /// [`PolicyRef::decorrelated_sequence`] instead.
    pub fn delay_for_attempt(
        &self,
        attempt: u32,
        random: impl RandomSource,
    ) -> Result<f64, PolicyError> {
        if matches!(self.jitter, JitterStrategy::Decorrelated { .. }) {
            return Err(PolicyError::strategy_mismatch(
                &self.name,
                "uses decorrelated jitter, which needs the previous delay",
            ));
        }
        let max = self.max_delay();
        let nominal = exponential_delay_ms(self.base_delay(), attempt, max)?;
        let jittered = self.jitter.apply(nominal, random)?;
        Ok(jittered.min(max))
    }

    /// Fresh [`DecorrelatedSequence`] configured from a decorrelated policy.
    pub fn decorrelated_sequence(&self) -> Result<DecorrelatedSequence, PolicyError> {
        match self.jitter {
            JitterStrategy::Decorrelated {
                base_ms,
                cap_ms,
                multiplier,
            } => Ok(DecorrelatedSequence::new(base_ms, cap_ms)?.with_multiplier(multiplier)?),
            _ => Err(PolicyError::strategy_mismatch(
                &self.name,
                "does not use decorrelated jitter",
            )),
        }
    }
}

/// Successive decorrelated delays, each derived from the one before.
///
/// The sequence starts from `base_ms` as its previous delay and keeps the last
/// value it produced; the core functions stay stateless.
#[derive(Clone, Debug)]
pub struct DecorrelatedSequence {
    base_ms: f64,
    cap_ms: f64,
    multiplier: f64,
    previous_ms: f64,
}

impl DecorrelatedSequence {
    pub fn new(base_ms: f64, cap_ms: f64) -> Result<Self, JitterError> {
        Ok(Self {
            base_ms: params::non_negative("base_delay", base_ms)?,
            cap_ms: params::non_negative("cap", cap_ms)?,
            multiplier: DEFAULT_MULTIPLIER,
            previous_ms: base_ms,
        })
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Result<Self, JitterError> {
        self.multiplier = params::positive("multiplier", multiplier)?;
        Ok(self)
    }

    /// Delay most recently produced, or the base delay before the first call.
    pub fn previous(&self) -> f64 {
        self.previous_ms
    }

    /// Start over from the base delay, e.g. after a successful call.
    pub fn reset(&mut self) {
        self.previous_ms = self.base_ms;
    }

    pub fn next_delay(&mut self, random: impl RandomSource) -> Result<f64, JitterError> {
        let next = add_decorrelated_jitter_with(
            self.base_ms,
            self.previous_ms,
            self.cap_ms,
            random,
            Some(self.multiplier),
        )?;
        self.previous_ms = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitter_core::RngSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exponential_doubles_and_caps() {
        assert_eq!(exponential_delay_ms(100.0, 0, 10_000.0), Ok(100.0));
        assert_eq!(exponential_delay_ms(100.0, 3, 10_000.0), Ok(800.0));
        assert_eq!(exponential_delay_ms(100.0, 10, 10_000.0), Ok(10_000.0));
        assert_eq!(exponential_delay_ms(1.0, u32::MAX, f64::MAX), Ok(65_536.0));
    }

    #[test]
    fn exponential_rejects_negative_base() {
        let err = exponential_delay_ms(-1.0, 0, 10.0).unwrap_err();
        assert_eq!(err.parameter(), Some("base_delay_ms"));
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(as_duration(1_500.0), Duration::from_millis(1_500));
        assert_eq!(as_duration(0.0), Duration::ZERO);
        assert_eq!(as_duration(-3.0), Duration::ZERO);
        assert_eq!(as_duration(f64::NAN), Duration::ZERO);
        assert_eq!(as_duration(f64::MAX), Duration::MAX);
    }

    #[test]
    fn policy_delay_is_clamped_to_max() {
        let policy = PolicyRef {
            name: "api".into(),
            jitter: JitterStrategy::Fixed { max_jitter_ms: 500.0 },
            base_delay_ms: Some(100.0),
            max_delay_ms: Some(1_000.0),
        };
        assert_eq!(policy.delay_for_attempt(0, || 0.0).unwrap(), 100.0);
        assert_eq!(policy.delay_for_attempt(2, || 0.5).unwrap(), 650.0);
        assert_eq!(policy.delay_for_attempt(8, || 0.5).unwrap(), 1_000.0);
    }

    #[test]
    fn attempt_delay_rejects_decorrelated_policy() {
        let policy = PolicyRef {
            name: "storage".into(),
            jitter: JitterStrategy::Decorrelated {
                base_ms: 100.0,
                cap_ms: 2_000.0,
                multiplier: 3.0,
            },
            base_delay_ms: None,
            max_delay_ms: None,
        };
        let err = policy.delay_for_attempt(3, || 0.5).unwrap_err();
        assert!(matches!(err, PolicyError::StrategyMismatch { ref name, .. } if name == "storage"));

        let mut sequence = policy.decorrelated_sequence().unwrap();
        assert_eq!(sequence.previous(), 100.0);
        // [100, 300] at 0.5 -> 200, then [100, 600] -> 350
        assert_eq!(sequence.next_delay(|| 0.5), Ok(200.0));
        assert_eq!(sequence.next_delay(|| 0.5), Ok(350.0));
    }

    #[test]
    fn sequence_requires_decorrelated_policy() {
        let policy = PolicyRef {
            name: "api".into(),
            jitter: JitterStrategy::Full,
            base_delay_ms: None,
            max_delay_ms: None,
        };
        assert!(matches!(
            policy.decorrelated_sequence(),
            Err(PolicyError::StrategyMismatch { .. })
        ));
    }

    #[test]
    fn sequence_stays_within_base_and_cap() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut sequence = DecorrelatedSequence::new(100.0, 5_000.0).unwrap();
        for _ in 0..500 {
            let delay = sequence.next_delay(RngSource(&mut rng)).unwrap();
            assert!((100.0..=5_000.0).contains(&delay));
            assert_eq!(sequence.previous(), delay);
        }
        sequence.reset();
        assert_eq!(sequence.previous(), 100.0);
    }

    #[test]
    fn sequence_threads_previous_delay() {
        let mut sequence = DecorrelatedSequence::new(100.0, 100_000.0)
            .unwrap()
            .with_multiplier(2.0)
            .unwrap();
        // [100, 200] at 0.5 -> 150, then [100, 300] -> 200, then [100, 400] -> 250
        assert_eq!(sequence.next_delay(|| 0.5), Ok(150.0));
        assert_eq!(sequence.next_delay(|| 0.5), Ok(200.0));
        assert_eq!(sequence.next_delay(|| 0.5), Ok(250.0));
    }

    #[test]
    fn failed_draw_keeps_previous_delay() {
        let mut sequence = DecorrelatedSequence::new(100.0, 1_000.0).unwrap();
        assert!(sequence.next_delay(|| f64::NAN).is_err());
        assert_eq!(sequence.previous(), 100.0);
    }

    #[test]
    fn sequence_rejects_bad_configuration() {
        assert!(DecorrelatedSequence::new(-1.0, 10.0).is_err());
        let err = DecorrelatedSequence::new(1.0, 10.0)
            .unwrap()
            .with_multiplier(0.0)
            .unwrap_err();
        assert_eq!(err.parameter(), Some("multiplier"));
    }
}
