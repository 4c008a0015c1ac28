//! Core error type definitions

use super::violation::Violation;
use std::path::PathBuf;

/// Result type alias for buildplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for buildplan operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The descriptor set breaks one or more graph rules
    Descriptor { violations: Vec<Violation> },

    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor document could not be parsed
    Parse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Unsupported operation errors
    Unsupported { feature: String, message: String },
}

impl Error {
    /// Violations carried by a descriptor error, empty for every other kind
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Descriptor { violations } => violations,
            _ => &[],
        }
    }
}
