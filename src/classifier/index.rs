//! Resource-group index over network security groups.

use crate::core::NetworkSecurityGroup;

use std::collections::HashMap;

/// Maps a resource group name to the NSGs that live in it.
///
/// Built once per evaluation pass and shared by reference with every
/// virtual machine evaluation. NSGs inside one group keep input order.
#[derive(Debug, Clone, Default)]
pub struct ResourceGroupIndex<'a> {
    groups: HashMap<&'a str, Vec<&'a NetworkSecurityGroup>>,
    ungrouped: Vec<&'a NetworkSecurityGroup>,
    match_unset: bool,
}

impl<'a> ResourceGroupIndex<'a> {
    /// Indexes the given NSGs by resource group.
    pub fn build(nsgs: &'a [NetworkSecurityGroup]) -> Self {
        let mut index = Self::default();
        for nsg in nsgs {
            match nsg.resource_group.as_deref() {
                Some(group) => index.groups.entry(group).or_default().push(nsg),
                None => index.ungrouped.push(nsg),
            }
        }
        index
    }

    /// Controls whether a VM without a resource group is paired with NSGs
    /// that also lack one. Disabled by default.
    pub fn with_unset_matching(mut self, enabled: bool) -> Self {
        self.match_unset = enabled;
        self
    }

    /// Returns the NSGs attached to the given resource group.
    pub fn attached(&self, resource_group: Option<&str>) -> &[&'a NetworkSecurityGroup] {
        match resource_group {
            Some(group) => self.groups.get(group).map(Vec::as_slice).unwrap_or(&[]),
            None if self.match_unset => &self.ungrouped,
            None => &[],
        }
    }

    /// Returns the number of distinct named resource groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the number of NSGs without a resource group.
    pub fn ungrouped_count(&self) -> usize {
        self.ungrouped.len()
    }
}
