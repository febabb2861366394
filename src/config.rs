//! Engine configuration.

use crate::core::{ComplianceError, ComplianceResult};
use crate::policy::PolicySet;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the compliance engine.
///
/// Every key is optional in a configuration document; missing keys take
/// their default (the baseline policies, strict resource-group matching).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policies applied per resource type.
    pub policies: PolicySet,

    /// Whether a VM with no resource group is attached to NSGs that also
    /// have none. Off by default: two unset groups are not the same group.
    pub match_unset_resource_group: bool,
}

impl EngineConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy set.
    pub fn with_policies(mut self, policies: PolicySet) -> Self {
        self.policies = policies;
        self
    }

    /// Enables or disables matching of unset resource groups.
    pub fn with_match_unset_resource_group(mut self, enabled: bool) -> Self {
        self.match_unset_resource_group = enabled;
        self
    }

    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(text: &str) -> ComplianceResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            ComplianceError::configuration(format!("invalid configuration document: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ComplianceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ComplianceError::configuration(format!(
                "failed to read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            match_unset_resource_group = config.match_unset_resource_group,
            "Loaded engine configuration"
        );
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ComplianceResult<()> {
        self.policies.validate()
    }
}
