//! # Cloudaudit
//!
//! Point-in-time compliance evaluation for cloud infrastructure snapshots.
//!
//! ## Overview
//!
//! Cloudaudit takes an already-collected list of cloud resource records and
//! produces a structured compliance report, allowing you to:
//!
//! - Classify heterogeneous records by their `type` discriminator
//! - Check storage accounts for encryption and secure transfer
//! - Check virtual machines for tagging, public exposure, and RDP/SSH
//!   blocking by the NSGs in their resource group
//! - Find overly permissive inbound NSG rules on critical ports
//! - Swap the built-in checks for configured policies
//! - Emit structured audit events for each evaluation run
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudaudit::{ComplianceEngine, ResourceRecord};
//! use serde_json::json;
//!
//! let records: Vec<ResourceRecord> = vec![
//!     json!({
//!         "type": "Storage Account",
//!         "name": "sa1",
//!         "encryption_enabled": true,
//!         "secure_transfer_required": false
//!     })
//!     .into(),
//! ];
//!
//! let engine = ComplianceEngine::new();
//! let evaluation = engine.evaluate(&records);
//!
//! let verdict = &evaluation.report.storage_accounts[0].compliance;
//! assert_eq!(verdict.flag("encryption_enabled"), Some(true));
//! assert_eq!(verdict.flag("secure_transfer_required"), Some(false));
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Core**: Resource records, typed views, I/O traits, and error handling
//! - **Classifier**: Grouping by type and the resource-group NSG index
//! - **Policy**: Configurable per-type checks and their verdicts
//! - **Engine**: One evaluation pass producing the report
//! - **IO**: JSON sources and sinks
//! - **Audit**: Structured logging for each run

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod classifier;
pub mod config;
pub mod core;
pub mod engine;
pub mod io;
pub mod policy;

// Re-export commonly used types at the crate root
pub use crate::config::EngineConfig;
pub use crate::core::{
    ComplianceError, ComplianceResult, InboundRule, NetworkSecurityGroup, ReportSink,
    ResourceKind, ResourceRecord, ResourceSource, StorageAccount, VirtualMachine,
};
pub use crate::engine::{ComplianceEngine, ComplianceReport, Evaluation, EvaluationSummary};
pub use crate::policy::{PolicySet, Verdict, VerdictValue};

/// Prelude module for convenient imports.
///
/// ```rust
/// use cloudaudit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::{
        ComplianceError, ComplianceResult, InboundRule, NetworkSecurityGroup, ReportSink,
        ResourceKind, ResourceRecord, ResourceSource, StorageAccount, VirtualMachine,
    };
    pub use crate::engine::{
        ComplianceEngine, ComplianceReport, Evaluation, EvaluationSummary, ReportEntry,
    };
    pub use crate::io::{
        JsonFileSink, JsonFileSource, JsonReaderSource, JsonWriterSink, StaticSource,
    };
    pub use crate::policy::{
        Expected, NsgCheck, NsgPolicy, PolicyCheck, PolicySet, StorageCheck, StoragePolicy,
        Verdict, VerdictValue, VmCheck, VmPolicy,
    };
}
