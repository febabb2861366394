//! Typed views over resource records.
//!
//! Each view resolves its type-specific fields from a [`ResourceRecord`]
//! using the rules in [`crate::core::fields`]. Optional fields stay
//! `None` when the input is missing or malformed; the rule evaluators
//! decide what an unset value means for compliance.

use crate::core::fields;
use crate::core::types::ResourceRecord;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A storage account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageAccount {
    /// Account name.
    pub name: Option<String>,
    /// Azure region.
    pub location: Option<String>,
    /// Owning resource group.
    pub resource_group: Option<String>,
    /// Whether blob encryption is enabled. Unset when not a boolean.
    pub encryption_enabled: Option<bool>,
    /// Whether HTTPS-only traffic is enforced. Unset when not a boolean.
    pub secure_transfer_required: Option<bool>,
}

impl StorageAccount {
    /// Creates a storage account with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Resolves a storage account from a raw record.
    pub fn from_record(record: &ResourceRecord) -> Self {
        let raw = record.fields();
        Self {
            name: record.name().map(str::to_owned),
            location: record.location().map(str::to_owned),
            resource_group: record.resource_group().map(str::to_owned),
            encryption_enabled: fields::bool_field(raw, "encryption_enabled"),
            secure_transfer_required: fields::bool_field(raw, "secure_transfer_required"),
        }
    }

    /// Sets the encryption flag.
    pub fn with_encryption_enabled(mut self, enabled: bool) -> Self {
        self.encryption_enabled = Some(enabled);
        self
    }

    /// Sets the secure transfer flag.
    pub fn with_secure_transfer_required(mut self, required: bool) -> Self {
        self.secure_transfer_required = Some(required);
        self
    }
}

/// A public IP attached to a virtual machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicIp {
    /// A resolved address such as `"20.1.2.3"`.
    Address(String),
    /// A public IP resource whose address could not be resolved.
    Unresolved {
        /// Resource ID of the public IP.
        public_ip_id: String,
    },
    /// Any other entry shape, kept as-is.
    Opaque(Value),
}

impl From<&Value> for PublicIp {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(address) => Self::Address(address.clone()),
            Value::Object(map) => match fields::string_field(map, "public_ip_id") {
                Some(public_ip_id) => Self::Unresolved { public_ip_id },
                None => Self::Opaque(value.clone()),
            },
            other => Self::Opaque(other.clone()),
        }
    }
}

/// A virtual machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachine {
    /// VM name.
    pub name: Option<String>,
    /// Azure region.
    pub location: Option<String>,
    /// Owning resource group, used to find attached NSGs.
    pub resource_group: Option<String>,
    /// Resource tags.
    pub tags: BTreeMap<String, String>,
    /// Public IPs exposed through the VM's network interfaces.
    pub public_ips: Vec<PublicIp>,
}

impl VirtualMachine {
    /// Creates a VM with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Resolves a VM from a raw record.
    pub fn from_record(record: &ResourceRecord) -> Self {
        let raw = record.fields();
        Self {
            name: record.name().map(str::to_owned),
            location: record.location().map(str::to_owned),
            resource_group: record.resource_group().map(str::to_owned),
            tags: fields::string_map_field(raw, "tags"),
            public_ips: fields::array_field(raw, "public_ips")
                .iter()
                .map(PublicIp::from)
                .collect(),
        }
    }

    /// Sets the resource group.
    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Adds a public IP.
    pub fn with_public_ip(mut self, ip: PublicIp) -> Self {
        self.public_ips.push(ip);
        self
    }

    /// Returns `true` if the VM carries a tag with the given key.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }
}

/// One inbound security rule of a network security group.
///
/// Every field is optional. Comparisons are exact string matches, so an
/// unset field never satisfies a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboundRule {
    /// Rule name.
    pub name: Option<String>,
    /// `"Allow"` or `"Deny"`.
    pub access: Option<String>,
    /// `"Inbound"` or `"Outbound"`.
    pub direction: Option<String>,
    /// Protocol, e.g. `"Tcp"` or `"*"`.
    pub protocol: Option<String>,
    /// Source address prefix, `"*"` meaning any source.
    pub source_address_prefix: Option<String>,
    /// Destination port range, e.g. `"22"`.
    pub destination_port_range: Option<String>,
}

impl InboundRule {
    /// `access` value that permits traffic.
    pub const ALLOW: &'static str = "Allow";
    /// `access` value that rejects traffic.
    pub const DENY: &'static str = "Deny";
    /// `direction` value for incoming traffic.
    pub const INBOUND: &'static str = "Inbound";
    /// `source_address_prefix` value that matches any source.
    pub const ANY_SOURCE: &'static str = "*";

    /// Creates a rule with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Resolves a rule from a raw rule object.
    pub fn from_fields(raw: &Map<String, Value>) -> Self {
        Self {
            name: fields::string_field(raw, "name"),
            access: fields::string_field(raw, "access"),
            direction: fields::string_field(raw, "direction"),
            protocol: fields::string_field(raw, "protocol"),
            source_address_prefix: fields::string_field(raw, "source_address_prefix"),
            destination_port_range: fields::string_field(raw, "destination_port_range"),
        }
    }

    /// Sets the access.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }

    /// Sets the direction.
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Sets the protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the source address prefix.
    pub fn with_source(mut self, prefix: impl Into<String>) -> Self {
        self.source_address_prefix = Some(prefix.into());
        self
    }

    /// Sets the destination port range.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.destination_port_range = Some(port.into());
        self
    }

    /// Returns `true` if the rule applies to inbound traffic.
    pub fn is_inbound(&self) -> bool {
        self.direction.as_deref() == Some(Self::INBOUND)
    }

    /// Returns `true` if the rule allows traffic.
    pub fn is_allow(&self) -> bool {
        self.access.as_deref() == Some(Self::ALLOW)
    }

    /// Returns `true` if the rule denies traffic.
    pub fn is_deny(&self) -> bool {
        self.access.as_deref() == Some(Self::DENY)
    }

    /// Returns `true` if the rule accepts traffic from any source.
    pub fn is_any_source(&self) -> bool {
        self.source_address_prefix.as_deref() == Some(Self::ANY_SOURCE)
    }

    /// Returns `true` if the destination port range equals `port` exactly.
    pub fn targets_port(&self, port: &str) -> bool {
        self.destination_port_range.as_deref() == Some(port)
    }
}

impl From<&Value> for InboundRule {
    fn from(value: &Value) -> Self {
        match value.as_object() {
            Some(raw) => Self::from_fields(raw),
            None => Self::default(),
        }
    }
}

/// A network security group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSecurityGroup {
    /// NSG name.
    pub name: Option<String>,
    /// Azure region.
    pub location: Option<String>,
    /// Owning resource group.
    pub resource_group: Option<String>,
    /// Inbound rules in their listed order.
    pub inbound_rules: Vec<InboundRule>,
}

impl NetworkSecurityGroup {
    /// Creates an NSG with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Resolves an NSG from a raw record.
    pub fn from_record(record: &ResourceRecord) -> Self {
        Self {
            name: record.name().map(str::to_owned),
            location: record.location().map(str::to_owned),
            resource_group: record.resource_group().map(str::to_owned),
            inbound_rules: fields::array_field(record.fields(), "inbound_rules")
                .iter()
                .map(InboundRule::from)
                .collect(),
        }
    }

    /// Sets the resource group.
    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    /// Appends an inbound rule.
    pub fn with_rule(mut self, rule: InboundRule) -> Self {
        self.inbound_rules.push(rule);
        self
    }
}
