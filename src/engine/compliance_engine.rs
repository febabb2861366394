//! The report aggregator.

use crate::audit;
use crate::classifier::{classify, ClassifiedResources, ResourceGroupIndex};
use crate::config::EngineConfig;
use crate::core::{ComplianceResult, ReportSink, ResourceRecord, ResourceSource};
use crate::engine::report::{ComplianceReport, Evaluation, EvaluationSummary, ReportEntry};
use crate::policy::{NsgPolicy, PolicySet, StoragePolicy, VmPolicy};

use chrono::Utc;
use uuid::Uuid;

/// Builder for creating a `ComplianceEngine`.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngineBuilder {
    config: EngineConfig,
}

impl ComplianceEngineBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whole configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the policy set.
    pub fn with_policies(mut self, policies: PolicySet) -> Self {
        self.config.policies = policies;
        self
    }

    /// Sets the storage account policy.
    pub fn with_storage_policy(mut self, policy: StoragePolicy) -> Self {
        self.config.policies.storage_account = policy;
        self
    }

    /// Sets the virtual machine policy.
    pub fn with_vm_policy(mut self, policy: VmPolicy) -> Self {
        self.config.policies.virtual_machine = policy;
        self
    }

    /// Sets the network security group policy.
    pub fn with_nsg_policy(mut self, policy: NsgPolicy) -> Self {
        self.config.policies.network_security_group = policy;
        self
    }

    /// Enables or disables matching of unset resource groups.
    pub fn match_unset_resource_group(mut self, enabled: bool) -> Self {
        self.config.match_unset_resource_group = enabled;
        self
    }

    /// Validates the configuration and builds the engine.
    pub fn build(self) -> ComplianceResult<ComplianceEngine> {
        self.config.validate()?;
        Ok(ComplianceEngine {
            config: self.config,
        })
    }
}

/// Evaluates resource snapshots and aggregates verdicts into reports.
///
/// The engine holds no state between calls. Every evaluation classifies
/// the input, indexes NSGs by resource group once, and evaluates each
/// recognized resource exactly once.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    config: EngineConfig,
}

impl ComplianceEngine {
    /// Creates an engine with the baseline policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder.
    pub fn builder() -> ComplianceEngineBuilder {
        ComplianceEngineBuilder::new()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the policy set.
    pub fn policies(&self) -> &PolicySet {
        &self.config.policies
    }

    /// Evaluates a full resource list.
    ///
    /// Never fails: malformed records degrade to failing verdict fields,
    /// and records of unrecognized types are skipped.
    pub fn evaluate(&self, records: &[ResourceRecord]) -> Evaluation {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        audit::emit_evaluation_started(&run_id, records.len());

        let classified = classify(records);
        if !classified.ignored.is_empty() {
            audit::emit_ignored_resources(&run_id, &classified.ignored);
        }

        let report = self.evaluate_classified(&classified);

        let mut non_compliant = 0;
        for (kind, entry) in report.non_compliant() {
            non_compliant += 1;
            audit::emit_resource_non_compliant(&run_id, &kind, entry);
        }

        let summary = EvaluationSummary {
            run_id,
            started_at,
            completed_at: Utc::now(),
            total_records: records.len(),
            storage_accounts: classified.storage_accounts.len(),
            virtual_machines: classified.virtual_machines.len(),
            network_security_groups: classified.network_security_groups.len(),
            ignored: classified
                .ignored
                .iter()
                .map(|(kind, count)| (kind.to_string(), *count))
                .collect(),
            non_compliant,
        };
        audit::emit_evaluation_completed(&summary);

        Evaluation { report, summary }
    }

    /// Evaluates already-classified resources.
    pub fn evaluate_classified(&self, classified: &ClassifiedResources) -> ComplianceReport {
        let policies = &self.config.policies;
        let index = ResourceGroupIndex::build(&classified.network_security_groups)
            .with_unset_matching(self.config.match_unset_resource_group);

        let storage_accounts = classified
            .storage_accounts
            .iter()
            .map(|account| {
                ReportEntry::new(
                    account.name.clone(),
                    policies.storage_account.evaluate(account),
                )
            })
            .collect();

        let virtual_machines = classified
            .virtual_machines
            .iter()
            .map(|vm| {
                let attached = index.attached(vm.resource_group.as_deref());
                tracing::trace!(
                    vm = ?vm.name,
                    resource_group = ?vm.resource_group,
                    attached_nsgs = attached.len(),
                    "Resolved attached NSGs"
                );
                ReportEntry::new(vm.name.clone(), policies.virtual_machine.evaluate(vm, attached))
            })
            .collect();

        let network_security_groups = classified
            .network_security_groups
            .iter()
            .map(|nsg| {
                ReportEntry::new(
                    nsg.name.clone(),
                    policies.network_security_group.evaluate(nsg),
                )
            })
            .collect();

        ComplianceReport {
            storage_accounts,
            virtual_machines,
            network_security_groups,
        }
    }

    /// Loads resources from `source`, evaluates them, and writes the report
    /// to `sink`.
    ///
    /// Nothing is written when loading fails.
    pub fn run(
        &self,
        source: &dyn ResourceSource,
        sink: &dyn ReportSink,
    ) -> ComplianceResult<EvaluationSummary> {
        let records = source.load()?;
        tracing::debug!(
            source = source.name(),
            records = records.len(),
            "Loaded resources"
        );

        let Evaluation { report, summary } = self.evaluate(&records);
        sink.write(&report)?;
        audit::emit_report_written(&summary.run_id, sink.name(), report.len());

        Ok(summary)
    }
}
