//! Virtual machine policy.

use crate::core::{NetworkSecurityGroup, VirtualMachine};
use crate::policy::rules::{Check, PolicyCheck, ResourcePolicy};
use crate::policy::verdict::{Expected, Verdict, VerdictValue};

use serde::{Deserialize, Serialize};

/// Port checked for remote desktop exposure.
pub const RDP_PORT: &str = "3389";

/// Port checked for SSH exposure.
pub const SSH_PORT: &str = "22";

/// A predicate over a virtual machine and its attached NSGs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VmCheck {
    /// Passes iff the VM has a tag with this key.
    HasTag {
        /// Tag key to look for.
        key: String,
    },

    /// Passes iff the VM exposes at least one public IP.
    HasPublicIps,

    /// Passes iff any attached NSG has an inbound deny rule for this port.
    PortBlocked {
        /// Destination port, compared exactly.
        port: String,
    },
}

impl VmCheck {
    /// Creates a `HasTag` check.
    pub fn has_tag(key: impl Into<String>) -> Self {
        Self::HasTag { key: key.into() }
    }

    /// Creates a `PortBlocked` check.
    pub fn port_blocked(port: impl Into<String>) -> Self {
        Self::PortBlocked { port: port.into() }
    }

    /// Evaluates this check against a VM and the NSGs attached to it.
    pub fn evaluate(&self, vm: &VirtualMachine, attached: &[&NetworkSecurityGroup]) -> VerdictValue {
        let passed = match self {
            Self::HasTag { key } => vm.has_tag(key),
            Self::HasPublicIps => !vm.public_ips.is_empty(),
            Self::PortBlocked { port } => attached.iter().any(|nsg| is_port_blocked(nsg, port)),
        };
        VerdictValue::Flag(passed)
    }
}

impl Check for VmCheck {
    fn accepts(&self, expected: &Expected) -> bool {
        matches!(expected, Expected::Flag(_))
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::HasTag { key } if key.is_empty() => Err("tag key is empty".into()),
            Self::PortBlocked { port } if port.is_empty() => Err("port is empty".into()),
            _ => Ok(()),
        }
    }
}

/// Returns `true` if the NSG has an inbound rule denying `port`.
///
/// Rule priority is not considered: one matching deny rule anywhere in
/// the list is enough.
pub fn is_port_blocked(nsg: &NetworkSecurityGroup, port: &str) -> bool {
    nsg.inbound_rules
        .iter()
        .any(|rule| rule.targets_port(port) && rule.is_deny() && rule.is_inbound())
}

/// Policy applied to every virtual machine.
pub type VmPolicy = ResourcePolicy<VmCheck>;

impl ResourcePolicy<VmCheck> {
    /// The built-in virtual machine policy.
    ///
    /// Field order: `environment_tags`, `owner_tag`, `has_public_ips`,
    /// `block_rdp`, `block_ssh`. Compliance requires both tags, no public
    /// IPs, and both remote-access ports blocked.
    pub fn baseline() -> Self {
        Self::new("virtual-machine-baseline")
            .with_description("VMs must be tagged, private, and closed to RDP and SSH")
            .with_check(
                PolicyCheck::new("environment_tags", VmCheck::has_tag("environment"))
                    .expect_flag(true),
            )
            .with_check(PolicyCheck::new("owner_tag", VmCheck::has_tag("owner")).expect_flag(true))
            .with_check(
                PolicyCheck::new("has_public_ips", VmCheck::HasPublicIps).expect_flag(false),
            )
            .with_check(
                PolicyCheck::new("block_rdp", VmCheck::port_blocked(RDP_PORT)).expect_flag(true),
            )
            .with_check(
                PolicyCheck::new("block_ssh", VmCheck::port_blocked(SSH_PORT)).expect_flag(true),
            )
    }

    /// Evaluates the policy against one VM and its attached NSGs.
    pub fn evaluate(&self, vm: &VirtualMachine, attached: &[&NetworkSecurityGroup]) -> Verdict {
        self.evaluate_with(|check| check.evaluate(vm, attached))
    }
}
