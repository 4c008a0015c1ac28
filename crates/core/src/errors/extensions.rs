//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), message.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Descriptor errors keep their violation list intact; callers match on it.
fn wrap(base: Error, message: String) -> Error {
    match base {
        Error::Descriptor { .. } => base,
        other => Error::Configuration {
            message: format!("{message}: {other}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Violation;

    #[test]
    fn test_context_wraps_message() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("reading catalog").unwrap_err();
        assert!(err.to_string().contains("reading catalog"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_context_preserves_violations() {
        let result: Result<()> = Err(Error::descriptor(vec![Violation::DuplicateModule {
            name: "a".to_string(),
        }]));
        let err = result.with_context(|| "loading".to_string()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }
}
