//! Error types for the cloudaudit library.
//!
//! The evaluation engine itself has no failure path: malformed resource
//! fields resolve to their documented defaults. Errors only arise at the
//! boundaries (reading resources, writing reports, loading configuration).

use thiserror::Error;

/// The main error type for cloudaudit operations.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// The resource collection could not be read from its source.
    #[error("failed to read resources from '{source_name}': {reason}")]
    ReadFailed {
        /// Name of the source (usually a path).
        source_name: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The resource document was read but is not a collection of records.
    #[error("failed to parse resources from '{source_name}': {reason}")]
    ParseFailed {
        /// Name of the source.
        source_name: String,
        /// Description of what's wrong with the document.
        reason: String,
    },

    /// The report could not be written to its sink.
    #[error("failed to write report to '{sink_name}': {reason}")]
    WriteFailed {
        /// Name of the sink (usually a path).
        sink_name: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComplianceError {
    /// Creates a `ReadFailed` error.
    pub fn read_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ParseFailed` error.
    pub fn parse_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `WriteFailed` error.
    pub fn write_failed(sink_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            sink_name: sink_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if this error happened while loading input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::ReadFailed { .. } | Self::ParseFailed { .. })
    }

    /// Returns `true` if this error happened while emitting output.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }

    /// Returns the source or sink name if this error is associated with one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::ReadFailed { source_name, .. } | Self::ParseFailed { source_name, .. } => {
                Some(source_name)
            }
            Self::WriteFailed { sink_name, .. } => Some(sink_name),
            _ => None,
        }
    }
}

/// A specialized `Result` type for cloudaudit operations.
pub type ComplianceResult<T> = Result<T, ComplianceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let read = ComplianceError::read_failed("resources.json", "no such file");
        assert!(read.is_input_error());
        assert!(!read.is_output_error());

        let write = ComplianceError::write_failed("report.json", "permission denied");
        assert!(write.is_output_error());
        assert!(!write.is_input_error());
    }

    #[test]
    fn test_error_endpoint() {
        let err = ComplianceError::parse_failed("stdin", "expected an array");
        assert_eq!(err.endpoint(), Some("stdin"));

        let err = ComplianceError::configuration("duplicate field");
        assert_eq!(err.endpoint(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ComplianceError::read_failed("azure_resources.json", "not found");
        let message = err.to_string();
        assert!(message.contains("azure_resources.json"));
        assert!(message.contains("not found"));
    }
}
