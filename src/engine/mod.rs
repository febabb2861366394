//! Orchestration of a full evaluation pass.
//!
//! The [`ComplianceEngine`] drives classification and rule evaluation
//! across a resource list and assembles the [`ComplianceReport`].

mod compliance_engine;
mod report;

pub use compliance_engine::{ComplianceEngine, ComplianceEngineBuilder};
pub use report::{ComplianceReport, Evaluation, EvaluationSummary, ReportEntry};
