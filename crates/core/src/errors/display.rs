//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Descriptor { violations } => match violations.as_slice() {
                [single] => write!(f, "invalid descriptors: {single}"),
                _ => {
                    write!(f, "invalid descriptors: {} violations", violations.len())?;
                    for violation in violations {
                        write!(f, "\n  - {violation}")?;
                    }
                    Ok(())
                }
            },
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Parse { path, message, .. } => {
                write!(
                    f,
                    "failed to parse descriptor file '{}': {}",
                    path.display(),
                    message
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::Unsupported { feature, message } => {
                write!(f, "unsupported feature '{feature}': {message}")
            }
        }
    }
}
