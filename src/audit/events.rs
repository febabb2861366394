//! Audit event types and emission functions.

use crate::core::ResourceKind;
use crate::engine::{EvaluationSummary, ReportEntry};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Base trait for audit events.
pub trait AuditEvent: Serialize {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the timestamp of the event.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Audit event for a completed evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationAuditEvent {
    /// Event type.
    pub event_type: String,

    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Unique run ID.
    pub run_id: Uuid,

    /// Evaluation duration in milliseconds.
    pub duration_ms: i64,

    /// Number of input records.
    pub total_records: usize,

    /// Number of storage accounts evaluated.
    pub storage_accounts: usize,

    /// Number of virtual machines evaluated.
    pub virtual_machines: usize,

    /// Number of network security groups evaluated.
    pub network_security_groups: usize,

    /// Number of skipped records.
    pub ignored_records: usize,

    /// Number of non-compliant resources.
    pub non_compliant: usize,
}

impl From<&EvaluationSummary> for EvaluationAuditEvent {
    fn from(summary: &EvaluationSummary) -> Self {
        Self {
            event_type: "evaluation_completed".to_string(),
            timestamp: summary.completed_at,
            run_id: summary.run_id,
            duration_ms: (summary.completed_at - summary.started_at).num_milliseconds(),
            total_records: summary.total_records,
            storage_accounts: summary.storage_accounts,
            virtual_machines: summary.virtual_machines,
            network_security_groups: summary.network_security_groups,
            ignored_records: summary.ignored_count(),
            non_compliant: summary.non_compliant,
        }
    }
}

impl AuditEvent for EvaluationAuditEvent {
    fn event_type(&self) -> &'static str {
        "evaluation_completed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Audit event for a single non-compliant resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAuditEvent {
    /// Event type.
    pub event_type: String,

    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Run the resource was evaluated in.
    pub run_id: Uuid,

    /// Resource type name.
    pub resource_type: String,

    /// Resource name.
    pub resource_name: Option<String>,

    /// Verdict fields that missed their expectation.
    pub failing_fields: Vec<String>,
}

impl ResourceAuditEvent {
    /// Creates an event for one report entry.
    pub fn new(run_id: &Uuid, kind: &ResourceKind, entry: &ReportEntry) -> Self {
        Self {
            event_type: "resource_non_compliant".to_string(),
            timestamp: Utc::now(),
            run_id: *run_id,
            resource_type: kind.to_string(),
            resource_name: entry.name.clone(),
            failing_fields: entry
                .compliance
                .failing_fields()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl AuditEvent for ResourceAuditEvent {
    fn event_type(&self) -> &'static str {
        "resource_non_compliant"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Emits an audit event for an evaluation starting.
pub fn emit_evaluation_started(run_id: &Uuid, record_count: usize) {
    tracing::info!(
        target: "cloudaudit::audit",
        event_type = "evaluation_started",
        run_id = %run_id,
        records = record_count,
        "Evaluation started"
    );
}

/// Emits a warning for each resource type the engine skipped.
pub fn emit_ignored_resources(run_id: &Uuid, ignored: &BTreeMap<ResourceKind, usize>) {
    for (kind, count) in ignored {
        tracing::warn!(
            target: "cloudaudit::audit",
            event_type = "resources_ignored",
            run_id = %run_id,
            resource_type = %kind,
            count = *count,
            "Skipped resources of unrecognized type"
        );
    }
}

/// Emits an audit event for a non-compliant resource.
pub fn emit_resource_non_compliant(run_id: &Uuid, kind: &ResourceKind, entry: &ReportEntry) {
    let event = ResourceAuditEvent::new(run_id, kind, entry);

    tracing::debug!(
        target: "cloudaudit::audit",
        event_type = "resource_non_compliant",
        run_id = %event.run_id,
        resource_type = %event.resource_type,
        resource_name = ?event.resource_name,
        failing_fields = ?event.failing_fields,
        "Resource is not compliant"
    );
}

/// Emits an audit event for a completed evaluation.
pub fn emit_evaluation_completed(summary: &EvaluationSummary) {
    let event = EvaluationAuditEvent::from(summary);

    tracing::info!(
        target: "cloudaudit::audit",
        event_type = "evaluation_completed",
        run_id = %event.run_id,
        duration_ms = event.duration_ms,
        total_records = event.total_records,
        storage_accounts = event.storage_accounts,
        virtual_machines = event.virtual_machines,
        network_security_groups = event.network_security_groups,
        ignored_records = event.ignored_records,
        non_compliant = event.non_compliant,
        "Evaluation completed"
    );
}

/// Emits an audit event for a report handed to a sink.
pub fn emit_report_written(run_id: &Uuid, sink: &str, entries: usize) {
    tracing::info!(
        target: "cloudaudit::audit",
        event_type = "report_written",
        run_id = %run_id,
        sink = %sink,
        entries = entries,
        "Compliance report written"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Expected, Verdict, VerdictValue};

    fn summary() -> EvaluationSummary {
        let started_at = Utc::now();
        let mut ignored = BTreeMap::new();
        ignored.insert("Resource Group".to_string(), 2);
        ignored.insert("Network Interface".to_string(), 1);

        EvaluationSummary {
            run_id: Uuid::new_v4(),
            started_at,
            completed_at: started_at + chrono::Duration::milliseconds(15),
            total_records: 9,
            storage_accounts: 2,
            virtual_machines: 2,
            network_security_groups: 2,
            ignored,
            non_compliant: 3,
        }
    }

    #[test]
    fn test_evaluation_event_from_summary() {
        let summary = summary();
        let event = EvaluationAuditEvent::from(&summary);

        assert_eq!(event.run_id, summary.run_id);
        assert_eq!(event.duration_ms, 15);
        assert_eq!(event.ignored_records, 3);
        assert_eq!(event.non_compliant, 3);
        assert_eq!(AuditEvent::event_type(&event), "evaluation_completed");
    }

    #[test]
    fn test_resource_event_lists_failing_fields() {
        let mut verdict = Verdict::new();
        verdict.push("owner_tag", VerdictValue::Flag(false), Some(Expected::Flag(true)));
        verdict.push("has_public_ips", VerdictValue::Flag(false), Some(Expected::Flag(false)));
        let entry = ReportEntry::new(Some("vm1".into()), verdict);

        let event = ResourceAuditEvent::new(&Uuid::new_v4(), &ResourceKind::VirtualMachine, &entry);
        assert_eq!(event.resource_type, "Virtual Machine");
        assert_eq!(event.resource_name.as_deref(), Some("vm1"));
        assert_eq!(event.failing_fields, vec!["owner_tag".to_string()]);
    }

    #[test]
    fn test_event_serializes() {
        let event = EvaluationAuditEvent::from(&summary());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_type"], "evaluation_completed");
        assert_eq!(value["total_records"], 9);
    }
}
