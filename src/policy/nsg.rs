//! Network security group policy.

use crate::core::{InboundRule, NetworkSecurityGroup};
use crate::policy::rules::{Check, PolicyCheck, ResourcePolicy};
use crate::policy::verdict::{Expected, RuleSummary, Verdict, VerdictValue};

use serde::{Deserialize, Serialize};

/// Ports whose exposure to any source makes a rule overly permissive.
pub const CRITICAL_PORTS: [&str; 4] = ["22", "3389", "80", "443"];

/// Returns [`CRITICAL_PORTS`] as owned strings.
pub fn critical_ports() -> Vec<String> {
    CRITICAL_PORTS.iter().map(|p| p.to_string()).collect()
}

/// A predicate over a network security group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NsgCheck {
    /// Number of overly permissive inbound rules on the given ports.
    PermissiveRuleCount {
        /// Ports considered critical.
        ports: Vec<String>,
    },

    /// Summaries of overly permissive inbound rules on the given ports.
    PermissiveRuleDetails {
        /// Ports considered critical.
        ports: Vec<String>,
    },
}

impl NsgCheck {
    /// Creates a `PermissiveRuleCount` check.
    pub fn permissive_count(ports: Vec<String>) -> Self {
        Self::PermissiveRuleCount { ports }
    }

    /// Creates a `PermissiveRuleDetails` check.
    pub fn permissive_details(ports: Vec<String>) -> Self {
        Self::PermissiveRuleDetails { ports }
    }

    /// Evaluates this check against an NSG.
    pub fn evaluate(&self, nsg: &NetworkSecurityGroup) -> VerdictValue {
        match self {
            Self::PermissiveRuleCount { ports } => {
                VerdictValue::Count(permissive_rules(nsg, ports).count())
            }
            Self::PermissiveRuleDetails { ports } => VerdictValue::Rules(
                permissive_rules(nsg, ports)
                    .map(|rule| RuleSummary {
                        name: rule.name.clone(),
                        source_address: rule.source_address_prefix.clone(),
                        destination_port: rule.destination_port_range.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

impl Check for NsgCheck {
    fn accepts(&self, expected: &Expected) -> bool {
        matches!(expected, Expected::AtMost(_))
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::PermissiveRuleCount { ports } | Self::PermissiveRuleDetails { ports } => {
                if ports.iter().any(String::is_empty) {
                    Err("port list contains an empty port".into())
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Returns `true` if the rule allows inbound traffic from any source to
/// one of `ports`.
pub fn is_overly_permissive(rule: &InboundRule, ports: &[String]) -> bool {
    rule.is_any_source()
        && rule.is_allow()
        && rule.is_inbound()
        && ports.iter().any(|port| rule.targets_port(port))
}

/// Iterates the NSG's overly permissive rules in list order.
pub fn permissive_rules<'a>(
    nsg: &'a NetworkSecurityGroup,
    ports: &'a [String],
) -> impl Iterator<Item = &'a InboundRule> + 'a {
    nsg.inbound_rules
        .iter()
        .filter(move |rule| is_overly_permissive(rule, ports))
}

/// Policy applied to every network security group.
pub type NsgPolicy = ResourcePolicy<NsgCheck>;

impl ResourcePolicy<NsgCheck> {
    /// The built-in network security group policy.
    ///
    /// Produces `permissive_rules_count` (must be zero for compliance)
    /// followed by `permissive rules details`.
    pub fn baseline() -> Self {
        Self::new("network-security-group-baseline")
            .with_description("NSGs must not expose critical ports to any source")
            .with_check(
                PolicyCheck::new(
                    "permissive_rules_count",
                    NsgCheck::permissive_count(critical_ports()),
                )
                .expect_at_most(0),
            )
            .with_check(PolicyCheck::new(
                "permissive rules details",
                NsgCheck::permissive_details(critical_ports()),
            ))
    }

    /// Evaluates the policy against one NSG.
    pub fn evaluate(&self, nsg: &NetworkSecurityGroup) -> Verdict {
        self.evaluate_with(|check| check.evaluate(nsg))
    }
}
