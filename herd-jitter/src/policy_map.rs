use indexmap::IndexMap;
use tracing::instrument;

use jitter_core::RandomSource;

use crate::types::{PolicyConfig, PolicyError, PolicyRef};

/// Name to [`PolicyRef`] lookup.
#[derive(Clone, Debug)]
pub struct PolicyMap {
    policies: IndexMap<String, PolicyRef>,
}

impl PolicyMap {
    /// Build a [`PolicyMap`] from a configuration file, validating every policy.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let mut policies = IndexMap::with_capacity(config.policies.len());
        for policy in &config.policies {
            if policies.contains_key(&policy.name) {
                return Err(PolicyError::DuplicatePolicy(policy.name.clone()));
            }
            if let Err(err) = policy.validate() {
                tracing::debug!(policy = %policy.name, %err, "rejecting jitter policy");
                return Err(PolicyError::invalid_policy(&policy.name, err));
            }
            policies.insert(policy.name.clone(), policy.clone());
        }

        Ok(PolicyMap { policies })
    }

    /// Retrieve a policy by name.
    pub fn get(&self, name: &str) -> Result<&PolicyRef, PolicyError> {
        self.policies
            .get(name)
            .ok_or_else(|| PolicyError::policy_not_found(name))
    }

    /// Iterate over policies in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PolicyRef)> {
        self.policies.iter()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Jitter `delay_ms` with the named policy's strategy.
    #[instrument(skip(self, random))]
    pub fn delay(
        &self,
        name: &str,
        delay_ms: f64,
        random: impl RandomSource,
    ) -> Result<f64, PolicyError> {
        let policy = self.get(name)?;
        let jittered = policy.jitter.apply(delay_ms, random)?;
        tracing::debug!(jittered, "computed jittered delay");
        Ok(jittered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JitterStrategy;

    fn policy(name: &str, jitter: JitterStrategy) -> PolicyRef {
        PolicyRef {
            name: name.into(),
            jitter,
            base_delay_ms: None,
            max_delay_ms: None,
        }
    }

    #[test]
    fn keeps_configuration_order() {
        let config = PolicyConfig {
            policies: vec![
                policy("b", JitterStrategy::Full),
                policy("a", JitterStrategy::Equal),
            ],
        };
        let map = PolicyMap::from_config(&config).unwrap();
        let names: Vec<_> = map.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rejects_duplicates() {
        let config = PolicyConfig {
            policies: vec![
                policy("api", JitterStrategy::Full),
                policy("api", JitterStrategy::Equal),
            ],
        };
        let err = PolicyMap::from_config(&config).unwrap_err();
        assert!(matches!(err, PolicyError::DuplicatePolicy(name) if name == "api"));
    }

    #[test]
    fn rejects_invalid_strategy_with_policy_name() {
        let config = PolicyConfig {
            policies: vec![policy("db", JitterStrategy::Symmetric { factor: 2.0 })],
        };
        match PolicyMap::from_config(&config).unwrap_err() {
            PolicyError::InvalidPolicy { name, source } => {
                assert_eq!(name, "db");
                assert_eq!(source.parameter(), Some("factor"));
            }
            other => panic!("expected invalid policy, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_base_delay() {
        let mut bad = policy("db", JitterStrategy::Full);
        bad.base_delay_ms = Some(-10.0);
        let config = PolicyConfig {
            policies: vec![bad],
        };
        assert!(matches!(
            PolicyMap::from_config(&config),
            Err(PolicyError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn unknown_policy_is_reported() {
        let map = PolicyMap::from_config(&PolicyConfig { policies: vec![] }).unwrap();
        assert!(map.is_empty());
        let err = map.get("missing").unwrap_err();
        assert_eq!(err.to_string(), "policy `missing` not found");
    }

    #[test]
    fn delay_applies_named_strategy() {
        let config = PolicyConfig {
            policies: vec![policy("api", JitterStrategy::Fixed { max_jitter_ms: 100.0 })],
        };
        let map = PolicyMap::from_config(&config).unwrap();
        assert_eq!(map.delay("api", 1_000.0, || 0.25).unwrap(), 1_025.0);
        assert!(matches!(
            map.delay("api", 1_000.0, || 1.0),
            Err(PolicyError::Jitter(_))
        ));
    }
}
