//! Resource sources and report sinks.
//!
//! Implementations of the [`ResourceSource`](crate::core::ResourceSource)
//! and [`ReportSink`](crate::core::ReportSink) boundary traits.
//!
//! ## Available Implementations
//!
//! - [`JsonFileSource`] / [`JsonReaderSource`] - A JSON array of records
//! - [`StaticSource`] - Records already in memory
//! - [`JsonFileSink`] / [`JsonWriterSink`] - Pretty-printed JSON report

mod sink;
mod source;

pub use sink::{JsonFileSink, JsonWriterSink};
pub use source::{parse_records, JsonFileSource, JsonReaderSource, StaticSource};
