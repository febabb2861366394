//! The full set of resource policies applied in one evaluation.

use crate::core::ComplianceResult;
use crate::policy::nsg::NsgPolicy;
use crate::policy::storage::StoragePolicy;
use crate::policy::vm::VmPolicy;

use serde::{Deserialize, Serialize};

/// One policy per evaluated resource type.
///
/// Missing entries in a serialized set fall back to the baseline policy
/// for that resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySet {
    /// Policy for storage accounts.
    pub storage_account: StoragePolicy,

    /// Policy for virtual machines.
    pub virtual_machine: VmPolicy,

    /// Policy for network security groups.
    pub network_security_group: NsgPolicy,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::baseline()
    }
}

impl PolicySet {
    /// The built-in policies for all three resource types.
    pub fn baseline() -> Self {
        Self {
            storage_account: StoragePolicy::baseline(),
            virtual_machine: VmPolicy::baseline(),
            network_security_group: NsgPolicy::baseline(),
        }
    }

    /// Replaces the storage account policy.
    pub fn with_storage_account(mut self, policy: StoragePolicy) -> Self {
        self.storage_account = policy;
        self
    }

    /// Replaces the virtual machine policy.
    pub fn with_virtual_machine(mut self, policy: VmPolicy) -> Self {
        self.virtual_machine = policy;
        self
    }

    /// Replaces the network security group policy.
    pub fn with_network_security_group(mut self, policy: NsgPolicy) -> Self {
        self.network_security_group = policy;
        self
    }

    /// Validates every policy in the set.
    pub fn validate(&self) -> ComplianceResult<()> {
        self.storage_account.validate()?;
        self.virtual_machine.validate()?;
        self.network_security_group.validate()
    }
}
