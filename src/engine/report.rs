//! Compliance report structures.

use crate::core::{ComplianceResult, ResourceKind};
use crate::policy::Verdict;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One resource's entry in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Resource name; `null` when the record had no string name.
    pub name: Option<String>,

    /// The resource's verdict.
    pub compliance: Verdict,
}

impl ReportEntry {
    /// Creates a new entry.
    pub fn new(name: Option<String>, compliance: Verdict) -> Self {
        Self { name, compliance }
    }

    /// Returns `true` if the verdict meets every expectation.
    pub fn is_compliant(&self) -> bool {
        self.compliance.is_compliant()
    }
}

/// The aggregated result of one evaluation pass.
///
/// Serializes to an object with exactly three keys. Entries inside each
/// group follow the input order of resources of that type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Storage account verdicts.
    pub storage_accounts: Vec<ReportEntry>,

    /// Virtual machine verdicts.
    pub virtual_machines: Vec<ReportEntry>,

    /// Network security group verdicts.
    pub network_security_groups: Vec<ReportEntry>,
}

impl ComplianceReport {
    /// Returns the entries of one group. Unrecognized kinds have none.
    pub fn group(&self, kind: &ResourceKind) -> &[ReportEntry] {
        match kind {
            ResourceKind::StorageAccount => &self.storage_accounts,
            ResourceKind::VirtualMachine => &self.virtual_machines,
            ResourceKind::NetworkSecurityGroup => &self.network_security_groups,
            _ => &[],
        }
    }

    /// Iterates every entry with its resource kind, group by group.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, &ReportEntry)> {
        let storage = self
            .storage_accounts
            .iter()
            .map(|e| (ResourceKind::StorageAccount, e));
        let vms = self
            .virtual_machines
            .iter()
            .map(|e| (ResourceKind::VirtualMachine, e));
        let nsgs = self
            .network_security_groups
            .iter()
            .map(|e| (ResourceKind::NetworkSecurityGroup, e));
        storage.chain(vms).chain(nsgs)
    }

    /// Iterates entries that miss at least one expectation.
    pub fn non_compliant(&self) -> impl Iterator<Item = (ResourceKind, &ReportEntry)> {
        self.entries().filter(|(_, entry)| !entry.is_compliant())
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.storage_accounts.len() + self.virtual_machines.len() + self.network_security_groups.len()
    }

    /// Returns `true` if the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ComplianceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Statistics about one evaluation pass.
///
/// Kept apart from [`ComplianceReport`] so that the report only contains
/// derived verdicts and stays identical across runs over the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Unique identifier for this run.
    pub run_id: Uuid,

    /// When evaluation started.
    pub started_at: DateTime<Utc>,

    /// When evaluation completed.
    pub completed_at: DateTime<Utc>,

    /// Number of input records.
    pub total_records: usize,

    /// Number of storage accounts evaluated.
    pub storage_accounts: usize,

    /// Number of virtual machines evaluated.
    pub virtual_machines: usize,

    /// Number of network security groups evaluated.
    pub network_security_groups: usize,

    /// Number of skipped records per type name.
    pub ignored: BTreeMap<String, usize>,

    /// Number of resources missing at least one expectation.
    pub non_compliant: usize,
}

impl EvaluationSummary {
    /// Returns the number of skipped records.
    pub fn ignored_count(&self) -> usize {
        self.ignored.values().sum()
    }

    /// Returns the number of evaluated resources.
    pub fn evaluated_count(&self) -> usize {
        self.storage_accounts + self.virtual_machines + self.network_security_groups
    }

    /// Returns `true` if every evaluated resource is compliant.
    pub fn is_compliant(&self) -> bool {
        self.non_compliant == 0
    }
}

/// A report together with the summary of the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The compliance report.
    pub report: ComplianceReport,

    /// Run statistics.
    pub summary: EvaluationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::VerdictValue;
    use serde_json::json;

    fn entry(name: &str, compliant: bool) -> ReportEntry {
        let mut verdict = Verdict::new();
        verdict.push(
            "encryption_enabled",
            VerdictValue::Flag(compliant),
            Some(crate::policy::Expected::Flag(true)),
        );
        ReportEntry::new(Some(name.to_string()), verdict)
    }

    #[test]
    fn test_empty_report_has_three_keys() {
        let value = serde_json::to_value(ComplianceReport::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "storage_accounts": [],
                "virtual_machines": [],
                "network_security_groups": []
            })
        );
    }

    #[test]
    fn test_unnamed_entry_serializes_null() {
        let entry = ReportEntry::new(None, Verdict::new());
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"name": null, "compliance": {}})
        );
    }

    #[test]
    fn test_non_compliant_entries() {
        let report = ComplianceReport {
            storage_accounts: vec![entry("good", true), entry("bad", false)],
            ..ComplianceReport::default()
        };

        let failing: Vec<_> = report
            .non_compliant()
            .map(|(kind, e)| (kind, e.name.clone()))
            .collect();
        assert_eq!(
            failing,
            vec![(ResourceKind::StorageAccount, Some("bad".to_string()))]
        );
        assert_eq!(report.len(), 2);
        assert_eq!(report.group(&ResourceKind::StorageAccount).len(), 2);
        assert!(report.group(&ResourceKind::Untyped).is_empty());
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = ComplianceReport {
            virtual_machines: vec![entry("vm1", true)],
            ..ComplianceReport::default()
        };

        let text = report.to_json_pretty().unwrap();
        let back: ComplianceReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.virtual_machines[0].name.as_deref(), Some("vm1"));
        assert_eq!(back.virtual_machines[0].compliance.flag("encryption_enabled"), Some(true));
    }
}
