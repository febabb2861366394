//! Structured audit logging for compliance runs.
//!
//! This module emits structured events through the `tracing` crate on the
//! `cloudaudit::audit` target. Any subscriber (JSON file, OpenTelemetry,
//! etc.) can capture them to keep a trail of evaluation runs.

mod events;

pub use events::{
    emit_evaluation_completed, emit_evaluation_started, emit_ignored_resources,
    emit_report_written, emit_resource_non_compliant, AuditEvent, EvaluationAuditEvent,
    ResourceAuditEvent,
};
