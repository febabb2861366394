//! Partitioning of raw records by resource kind.

use crate::core::{
    NetworkSecurityGroup, ResourceKind, ResourceRecord, StorageAccount, VirtualMachine,
};

use std::collections::BTreeMap;

/// Records split into the evaluated resource groups.
///
/// Each group keeps the relative order the records had in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedResources {
    /// Storage accounts, in input order.
    pub storage_accounts: Vec<StorageAccount>,

    /// Virtual machines, in input order.
    pub virtual_machines: Vec<VirtualMachine>,

    /// Network security groups, in input order.
    pub network_security_groups: Vec<NetworkSecurityGroup>,

    /// Number of skipped records per unrecognized kind.
    pub ignored: BTreeMap<ResourceKind, usize>,
}

impl ClassifiedResources {
    /// Returns the number of records placed in a group.
    pub fn recognized_count(&self) -> usize {
        self.storage_accounts.len() + self.virtual_machines.len() + self.network_security_groups.len()
    }

    /// Returns the number of records that were skipped.
    pub fn ignored_count(&self) -> usize {
        self.ignored.values().sum()
    }

    /// Returns `true` if no record was placed in any group.
    pub fn is_empty(&self) -> bool {
        self.recognized_count() == 0
    }
}

/// Classifies records by their `type` discriminator.
///
/// Selection is an exact string match. Records of any other kind (or with
/// no kind at all) are counted in [`ClassifiedResources::ignored`] and
/// otherwise dropped.
pub fn classify(records: &[ResourceRecord]) -> ClassifiedResources {
    let mut classified = ClassifiedResources::default();

    for record in records {
        match record.kind() {
            ResourceKind::StorageAccount => classified
                .storage_accounts
                .push(StorageAccount::from_record(record)),
            ResourceKind::VirtualMachine => classified
                .virtual_machines
                .push(VirtualMachine::from_record(record)),
            ResourceKind::NetworkSecurityGroup => classified
                .network_security_groups
                .push(NetworkSecurityGroup::from_record(record)),
            other => *classified.ignored.entry(other.clone()).or_insert(0) += 1,
        }
    }

    tracing::debug!(
        storage_accounts = classified.storage_accounts.len(),
        virtual_machines = classified.virtual_machines.len(),
        network_security_groups = classified.network_security_groups.len(),
        ignored = classified.ignored_count(),
        "Classified resources"
    );

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<ResourceRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_classify_preserves_order() {
        let input = records(json!([
            {"type": "Virtual Machine", "name": "vm-b"},
            {"type": "Storage Account", "name": "sa-1"},
            {"type": "Virtual Machine", "name": "vm-a"},
            {"type": "Network Security Group", "name": "nsg-1"},
            {"type": "Storage Account", "name": "sa-2"}
        ]));

        let classified = classify(&input);
        let vm_names: Vec<_> = classified
            .virtual_machines
            .iter()
            .map(|vm| vm.name.as_deref())
            .collect();
        let sa_names: Vec<_> = classified
            .storage_accounts
            .iter()
            .map(|sa| sa.name.as_deref())
            .collect();

        assert_eq!(vm_names, vec![Some("vm-b"), Some("vm-a")]);
        assert_eq!(sa_names, vec![Some("sa-1"), Some("sa-2")]);
        assert_eq!(classified.network_security_groups.len(), 1);
    }

    #[test]
    fn test_classify_drops_unrecognized() {
        let input = records(json!([
            {"type": "Resource Group", "name": "rg1"},
            {"type": "Network Interface", "name": "nic1"},
            {"type": "Resource Group", "name": "rg2"},
            {"name": "no-type"},
            42
        ]));

        let classified = classify(&input);
        assert!(classified.is_empty());
        assert_eq!(classified.ignored_count(), 5);
        assert_eq!(
            classified
                .ignored
                .get(&ResourceKind::Unrecognized("Resource Group".into())),
            Some(&2)
        );
        assert_eq!(classified.ignored.get(&ResourceKind::Untyped), Some(&2));
    }

    #[test]
    fn test_classify_is_a_partition() {
        let input = records(json!([
            {"type": "Storage Account", "name": "sa"},
            {"type": "Virtual Machine", "name": "vm"},
            {"type": "Network Security Group", "name": "nsg"},
            {"type": "virtual machine", "name": "lowercase"}
        ]));

        let classified = classify(&input);
        assert_eq!(classified.recognized_count(), 3);
        assert_eq!(classified.recognized_count() + classified.ignored_count(), input.len());
    }
}
