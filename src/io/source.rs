//! Resource source implementations.

use crate::core::{ComplianceError, ResourceRecord, ResourceSource};

use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parses a JSON document holding an array of resource records.
///
/// Individual elements are never rejected; only a document that is not
/// valid JSON, or whose top level is not an array, fails.
pub fn parse_records(source_name: &str, bytes: &[u8]) -> Result<Vec<ResourceRecord>, ComplianceError> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| ComplianceError::parse_failed(source_name, e.to_string()))?;

    match document {
        Value::Array(items) => Ok(items.into_iter().map(ResourceRecord::from).collect()),
        other => Err(ComplianceError::parse_failed(
            source_name,
            format!("expected a JSON array of resources, found {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads resources from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    /// Creates a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<ResourceRecord>, ComplianceError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| ComplianceError::read_failed(&self.name, e.to_string()))?;
        parse_records(&self.name, &bytes)
    }
}

/// Reads resources from any reader, such as standard input.
///
/// The reader is consumed by the first `load`.
pub struct JsonReaderSource<R> {
    reader: RefCell<R>,
    name: String,
}

impl<R: Read> JsonReaderSource<R> {
    /// Creates a source over a reader.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            reader: RefCell::new(reader),
            name: name.into(),
        }
    }
}

impl<R> fmt::Debug for JsonReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonReaderSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<R: Read> ResourceSource for JsonReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<ResourceRecord>, ComplianceError> {
        let mut bytes = Vec::new();
        self.reader
            .borrow_mut()
            .read_to_end(&mut bytes)
            .map_err(|e| ComplianceError::read_failed(&self.name, e.to_string()))?;
        parse_records(&self.name, &bytes)
    }
}

/// Serves a fixed set of records already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<ResourceRecord>,
}

impl StaticSource {
    /// Creates a source over the given records.
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    /// Creates a source from raw JSON values.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(values.into_iter().map(ResourceRecord::from).collect())
    }

    /// Appends a record and returns self for chaining.
    pub fn with_record(mut self, record: impl Into<ResourceRecord>) -> Self {
        self.records.push(record.into());
        self
    }
}

impl ResourceSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> Result<Vec<ResourceRecord>, ComplianceError> {
        Ok(self.records.clone())
    }
}
