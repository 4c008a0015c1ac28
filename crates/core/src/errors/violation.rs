//! Descriptor rule violations
//!
//! Loading and validation never stop at the first problem. Every rule breach is
//! recorded as a [`Violation`] and the full list is handed back to the caller.

use serde::Serialize;

/// A single descriptor rule breach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error, miette::Diagnostic)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    /// A record is missing a required field or carries an unusable value
    #[error("malformed record #{record}: field '{field}' {message}")]
    #[diagnostic(code(buildplan::malformed_record))]
    MalformedRecord {
        record: usize,
        field: String,
        message: String,
    },

    /// Two records declare the same module name
    #[error("duplicate module '{name}'")]
    #[diagnostic(
        code(buildplan::duplicate_module),
        help("module names must be unique across all descriptor files")
    )]
    DuplicateModule { name: String },

    /// A dependency points at an undeclared module or unknown catalog alias
    #[error("module '{module}' depends on unresolved target '{target}'")]
    #[diagnostic(code(buildplan::unresolved_dependency))]
    UnresolvedDependency { module: String, target: String },

    /// The internal dependency edges form a cycle
    #[error("cyclic dependency between modules {}", .cycle.join(","))]
    #[diagnostic(code(buildplan::cyclic_dependency))]
    CyclicDependency { cycle: Vec<String> },

    /// A module declares the same test suite name more than once
    #[error("duplicate test suite '{suite}' in module '{module}'")]
    #[diagnostic(code(buildplan::duplicate_test_suite))]
    DuplicateTestSuite { module: String, suite: String },

    /// A report aggregates a suite no aggregated module declares
    #[error("report '{report}' in module '{module}' references unknown test suite '{suite}'")]
    #[diagnostic(
        code(buildplan::unknown_report_suite),
        help("declare the suite in this module or in a module it aggregates")
    )]
    UnknownReportSuite {
        module: String,
        report: String,
        suite: String,
    },
}

impl Violation {
    /// Stable taxonomy name of this violation
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::MalformedRecord { .. } => "MalformedRecordError",
            Violation::DuplicateModule { .. } => "DuplicateModuleError",
            Violation::UnresolvedDependency { .. } => "UnresolvedDependencyError",
            Violation::CyclicDependency { .. } => "CyclicDependencyError",
            Violation::DuplicateTestSuite { .. } => "DuplicateTestSuiteError",
            Violation::UnknownReportSuite { .. } => "UnknownReportSuiteError",
        }
    }

    pub fn malformed(record: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Violation::MalformedRecord {
            record,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulator for violations found during a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.0.extend(violations);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    /// Yield `value` when nothing was recorded, otherwise the full list as an error
    pub fn into_result<T>(self, value: T) -> crate::errors::Result<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.into())
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display_joins_names() {
        let violation = Violation::CyclicDependency {
            cycle: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(violation.to_string(), "cyclic dependency between modules A,B");
        assert_eq!(violation.kind(), "CyclicDependencyError");
    }

    #[test]
    fn test_diagnostic_code() {
        use miette::Diagnostic;

        let violation = Violation::DuplicateModule {
            name: "lib".to_string(),
        };
        let code = violation.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("buildplan::duplicate_module"));
        assert!(violation.help().is_some());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Violations::new().into_result(7).unwrap(), 7);

        let mut violations = Violations::new();
        violations.push(Violation::malformed(0, "name", "is required"));
        let err = violations.into_result(()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].kind(), "MalformedRecordError");
    }

    #[test]
    fn test_serialized_kind_tag() {
        let violation = Violation::DuplicateTestSuite {
            module: "lib".to_string(),
            suite: "test".to_string(),
        };
        let value = serde_json::to_value(&violation).unwrap();
        assert_eq!(value["kind"], "duplicateTestSuite");
        assert_eq!(value["suite"], "test");
    }
}
