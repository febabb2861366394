//! Core types and traits for the cloudaudit library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - The resource kind discriminator and raw record envelope
//! - [`resource`] - Typed views: storage accounts, VMs, NSGs, inbound rules
//! - [`traits`] - The `ResourceSource` and `ReportSink` boundary traits
//! - [`error`] - Structured error types

pub mod error;
mod fields;
pub mod resource;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{ComplianceError, ComplianceResult};
pub use resource::{InboundRule, NetworkSecurityGroup, PublicIp, StorageAccount, VirtualMachine};
pub use traits::{BoxedSink, BoxedSource, ReportSink, ResourceSource};
pub use types::{ResourceKind, ResourceRecord};
