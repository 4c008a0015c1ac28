//! Builder methods for creating errors with context

use super::types::Error;
use super::violation::Violation;
use std::path::PathBuf;

impl Error {
    /// Create a descriptor error from collected violations
    #[must_use]
    pub fn descriptor(violations: impl Into<Vec<Violation>>) -> Self {
        Error::Descriptor {
            violations: violations.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error for a descriptor document
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error with a source error
    #[must_use]
    pub fn parse_with_source(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unsupported feature error
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
            message: message.into(),
        }
    }
}
