//! Parsing of policy documents the caller has already read.

use tracing::instrument;

use crate::policy_map::PolicyMap;
use crate::types::{PolicyConfig, PolicyError};

/// Serialization format of a policy document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl PolicyConfig {
    pub fn from_json_str(content: &str) -> Result<Self, PolicyError> {
        Self::parse(content, ConfigFormat::Json)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, PolicyError> {
        Self::parse(content, ConfigFormat::Yaml)
    }

    /// Decode `content` as `format`. Policies are not validated here; see
    /// [`PolicyMap::from_config`].
    #[instrument(skip(content), fields(bytes = content.len()))]
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, PolicyError> {
        let config: PolicyConfig = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml_bw::from_str(content)?,
        };
        tracing::debug!(policies = config.policies.len(), "parsed jitter policy config");
        Ok(config)
    }
}

impl PolicyMap {
    /// Parse and validate a policy document in one step.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, PolicyError> {
        let config = PolicyConfig::parse(content, format)?;
        Self::from_config(&config)
    }
}
