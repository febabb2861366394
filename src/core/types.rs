//! Core types used throughout the cloudaudit library.
//!
//! This module defines the resource type discriminator and the raw
//! resource record envelope that every input document is read into.

use crate::core::fields;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// The kind of a resource, taken from its `type` discriminator.
///
/// Only the three recognized kinds are evaluated. Every other value is
/// preserved so that it can be reported in audit events, but it never
/// reaches a rule evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// `"Storage Account"`.
    StorageAccount,
    /// `"Virtual Machine"`.
    VirtualMachine,
    /// `"Network Security Group"`.
    NetworkSecurityGroup,
    /// Any other `type` string (e.g. `"Resource Group"`, `"Network Interface"`).
    Unrecognized(String),
    /// The record has no string `type` field at all.
    Untyped,
}

impl ResourceKind {
    /// Discriminator value for storage accounts.
    pub const STORAGE_ACCOUNT: &'static str = "Storage Account";
    /// Discriminator value for virtual machines.
    pub const VIRTUAL_MACHINE: &'static str = "Virtual Machine";
    /// Discriminator value for network security groups.
    pub const NETWORK_SECURITY_GROUP: &'static str = "Network Security Group";

    /// Resolves a kind from an optional `type` string. Matching is exact.
    pub fn from_type_name(type_name: Option<&str>) -> Self {
        match type_name {
            Some(Self::STORAGE_ACCOUNT) => Self::StorageAccount,
            Some(Self::VIRTUAL_MACHINE) => Self::VirtualMachine,
            Some(Self::NETWORK_SECURITY_GROUP) => Self::NetworkSecurityGroup,
            Some(other) => Self::Unrecognized(other.to_string()),
            None => Self::Untyped,
        }
    }

    /// Returns `true` for the three kinds the engine evaluates.
    pub fn is_recognized(&self) -> bool {
        matches!(
            self,
            Self::StorageAccount | Self::VirtualMachine | Self::NetworkSecurityGroup
        )
    }

    /// Returns the discriminator string, or `None` for untyped records.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::StorageAccount => Some(Self::STORAGE_ACCOUNT),
            Self::VirtualMachine => Some(Self::VIRTUAL_MACHINE),
            Self::NetworkSecurityGroup => Some(Self::NETWORK_SECURITY_GROUP),
            Self::Unrecognized(name) => Some(name),
            Self::Untyped => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "<untyped>"),
        }
    }
}

/// A single resource description as it appears in the input document.
///
/// Construction never fails: any JSON value can become a record. Values
/// that are not objects become empty, untyped records. The common fields
/// (`type`, `name`, `location`, `resource_group`) are resolved once here;
/// type-specific fields are resolved by the typed views in
/// [`crate::core::resource`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    kind: ResourceKind,
    name: Option<String>,
    location: Option<String>,
    resource_group: Option<String>,
    fields: Map<String, Value>,
}

impl ResourceRecord {
    /// Creates a record from a raw JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            kind: ResourceKind::from_type_name(fields::str_field(&fields, "type")),
            name: fields::string_field(&fields, "name"),
            location: fields::string_field(&fields, "location"),
            resource_group: fields::string_field(&fields, "resource_group"),
            fields,
        }
    }

    /// Returns the resolved resource kind.
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// Returns the resource name, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the resource location, if it is a string.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the resource group, if it is a string.
    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    /// Returns the raw field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a single raw field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl From<Value> for ResourceRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::from_fields(Map::new()),
        }
    }
}

impl Serialize for ResourceRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_exact_match() {
        assert_eq!(
            ResourceKind::from_type_name(Some("Storage Account")),
            ResourceKind::StorageAccount
        );
        assert_eq!(
            ResourceKind::from_type_name(Some("storage account")),
            ResourceKind::Unrecognized("storage account".into())
        );
        assert_eq!(ResourceKind::from_type_name(None), ResourceKind::Untyped);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::VirtualMachine.to_string(), "Virtual Machine");
        assert_eq!(ResourceKind::Untyped.to_string(), "<untyped>");
        assert!(!ResourceKind::Unrecognized("Resource Group".into()).is_recognized());
    }

    #[test]
    fn test_record_common_fields() {
        let record = ResourceRecord::from(json!({
            "type": "Virtual Machine",
            "name": "vm1",
            "location": "eastus",
            "resource_group": "rg1"
        }));

        assert_eq!(record.kind(), &ResourceKind::VirtualMachine);
        assert_eq!(record.name(), Some("vm1"));
        assert_eq!(record.location(), Some("eastus"));
        assert_eq!(record.resource_group(), Some("rg1"));
    }

    #[test]
    fn test_record_malformed_common_fields() {
        let record = ResourceRecord::from(json!({
            "type": 7,
            "name": null,
            "resource_group": ["rg1"]
        }));

        assert_eq!(record.kind(), &ResourceKind::Untyped);
        assert_eq!(record.name(), None);
        assert_eq!(record.resource_group(), None);
    }

    #[test]
    fn test_record_from_non_object() {
        let record = ResourceRecord::from(json!("not a resource"));
        assert_eq!(record.kind(), &ResourceKind::Untyped);
        assert!(record.fields().is_empty());
    }

    #[test]
    fn test_record_serializes_raw_fields() {
        let raw = json!({"type": "Resource Group", "name": "rg1", "location": "westus"});
        let record: ResourceRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_record_raw_field_access() {
        let record = ResourceRecord::from(json!({
            "type": "Storage Account",
            "encryption_enabled": "true"
        }));

        assert_eq!(record.field("encryption_enabled"), Some(&json!("true")));
        assert_eq!(record.field("secure_transfer_required"), None);
    }
}
