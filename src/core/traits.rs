//! Core traits for the cloudaudit library.
//!
//! These traits describe the I/O boundary around the evaluation engine:
//! where resource records come from and where finished reports go. The
//! engine never calls them itself; [`crate::engine::ComplianceEngine::run`]
//! wires a source and a sink around one evaluation pass.

use crate::core::error::ComplianceError;
use crate::core::types::ResourceRecord;
use crate::engine::ComplianceReport;

use std::fmt::Debug;

/// A provider of already-materialized resource records.
///
/// # Implementation Notes
///
/// - `load` returns the complete collection or an error; it never returns
///   a partial list.
/// - Individual malformed records are not errors. They are returned as-is
///   and degraded by the engine.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use cloudaudit::core::{ComplianceError, ResourceRecord, ResourceSource};
///
/// #[derive(Debug)]
/// struct InventoryApi {
///     endpoint: String,
/// }
///
/// impl ResourceSource for InventoryApi {
///     fn name(&self) -> &str {
///         &self.endpoint
///     }
///
///     fn load(&self) -> Result<Vec<ResourceRecord>, ComplianceError> {
///         // Fetch and convert records...
///         todo!()
///     }
/// }
/// ```
pub trait ResourceSource: Debug {
    /// Returns a stable, human-readable name for the source (usually a path).
    fn name(&self) -> &str;

    /// Loads every resource record.
    ///
    /// # Errors
    ///
    /// - `ReadFailed` - The underlying data could not be read.
    /// - `ParseFailed` - The data is not a collection of records.
    fn load(&self) -> Result<Vec<ResourceRecord>, ComplianceError>;
}

/// A destination for finished compliance reports.
pub trait ReportSink: Debug {
    /// Returns a stable, human-readable name for the sink.
    fn name(&self) -> &str;

    /// Writes a complete report.
    ///
    /// Implementations must serialize the whole report before committing
    /// any bytes, so that a failure never leaves a truncated report behind.
    ///
    /// # Errors
    ///
    /// - `WriteFailed` - The report could not be written.
    fn write(&self, report: &ComplianceReport) -> Result<(), ComplianceError>;
}

/// A boxed source for type-erased storage.
pub type BoxedSource = Box<dyn ResourceSource>;

/// A boxed sink for type-erased storage.
pub type BoxedSink = Box<dyn ReportSink>;
