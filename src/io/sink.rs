//! Report sink implementations.

use crate::core::{ComplianceError, ReportSink};
use crate::engine::ComplianceReport;

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the report as pretty-printed JSON to a file.
///
/// The report is first written to a sibling `.tmp` file and then renamed
/// over the target, so the target is either the previous content or the
/// complete new report.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    name: String,
}

impl JsonFileSink {
    /// Creates a sink for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the report is staged in. `None` when the target has
    /// no file name (e.g. `..`).
    fn temp_path(&self) -> Option<PathBuf> {
        let mut file_name = self.path.file_name()?.to_os_string();
        file_name.push(".tmp");
        Some(self.path.with_file_name(file_name))
    }
}

impl ReportSink for JsonFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, report: &ComplianceReport) -> Result<(), ComplianceError> {
        let temp_path = self.temp_path().ok_or_else(|| {
            ComplianceError::write_failed(&self.name, "path does not name a file")
        })?;

        let content = report
            .to_json_pretty()
            .map_err(|e| ComplianceError::write_failed(&self.name, e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ComplianceError::write_failed(
                    &self.name,
                    format!("failed to create directory: {}", e),
                )
            })?;
        }

        std::fs::write(&temp_path, content.as_bytes())
            .map_err(|e| ComplianceError::write_failed(&self.name, e.to_string()))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            ComplianceError::write_failed(&self.name, e.to_string())
        })?;

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "Report written");
        Ok(())
    }
}

/// Writes the report as pretty-printed JSON to any writer, such as
/// standard output.
pub struct JsonWriterSink<W> {
    writer: RefCell<W>,
    name: String,
}

impl<W: Write> JsonWriterSink<W> {
    /// Creates a sink over a writer.
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            name: name.into(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W> fmt::Debug for JsonWriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWriterSink")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<W: Write> ReportSink for JsonWriterSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, report: &ComplianceReport) -> Result<(), ComplianceError> {
        let mut content = report
            .to_json_pretty()
            .map_err(|e| ComplianceError::write_failed(&self.name, e.to_string()))?;
        content.push('\n');

        let mut writer = self.writer.borrow_mut();
        writer
            .write_all(content.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| ComplianceError::write_failed(&self.name, e.to_string()))
    }
}
