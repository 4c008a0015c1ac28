//! Conversion of raw records into modules
//!
//! Each record is checked on its own; problems are collected per field so a
//! single pass reports everything wrong with the record set.

use crate::parser::types::{RawDependency, RawDescriptor, RawReport, RawTestSuite};
use buildplan_core::constants::{DEFAULT_SCOPE, DEFAULT_SUITE_KIND};
use buildplan_core::{
    DependencyReference, DependencyTarget, Error, Module, ModuleName, Report, Scope, SuiteKind,
    TestSuite, ToolchainVersion, Violation, Violations,
};
use std::collections::HashSet;

/// Build modules from records, collecting every malformed field
///
/// Records that fail are left out of the returned modules; the caller must
/// treat a non-empty violation list as failure for the whole set.
pub fn build_modules(records: &[RawDescriptor]) -> (Vec<Module>, Violations) {
    let mut modules = Vec::with_capacity(records.len());
    let mut violations = Violations::new();

    for (index, record) in records.iter().enumerate() {
        match build_module(index, record) {
            Ok(module) => modules.push(module),
            Err(found) => violations.extend(found),
        }
    }

    (modules, violations)
}

/// Names declared by more than one record, each reported once
///
/// Every record with a usable name takes part, including records that are
/// malformed elsewhere.
pub fn duplicate_names(records: &[RawDescriptor]) -> Vec<Violation> {
    let mut seen: HashSet<ModuleName> = HashSet::with_capacity(records.len());
    let mut reported: HashSet<ModuleName> = HashSet::new();
    let mut violations = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Ok(name) = record_name(index, record) else {
            continue;
        };
        if seen.contains(&name) {
            if reported.insert(name.clone()) {
                violations.push(Violation::DuplicateModule {
                    name: name.to_string(),
                });
            }
        } else {
            seen.insert(name);
        }
    }

    violations
}

/// Build a single module from the record at `index`
pub fn build_module(index: usize, record: &RawDescriptor) -> Result<Module, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = match record_name(index, record) {
        Ok(name) => Some(name),
        Err(violation) => {
            violations.push(violation);
            None
        }
    };

    for (i, plugin) in record.plugins.iter().enumerate() {
        if plugin.trim().is_empty() {
            violations.push(Violation::malformed(
                index,
                format!("plugins[{i}]"),
                "cannot be empty",
            ));
        }
    }

    let dependencies: Vec<DependencyReference> = record
        .dependencies
        .iter()
        .enumerate()
        .filter_map(|(i, dep)| dependency(index, i, dep, &mut violations))
        .collect();

    let toolchain_floor = match record.toolchain_floor.as_deref() {
        None => None,
        Some(raw) => match ToolchainVersion::parse(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                violations.push(Violation::malformed(index, "toolchainFloor", reason(e)));
                None
            }
        },
    };

    let test_suites: Vec<TestSuite> = record
        .test_suites
        .iter()
        .enumerate()
        .filter_map(|(i, suite)| test_suite(index, i, suite, &mut violations))
        .collect();

    let reports: Vec<Report> = record
        .reports
        .iter()
        .enumerate()
        .filter_map(|(i, report)| report_entry(index, i, report, &mut violations))
        .collect();

    match name {
        Some(name) if violations.is_empty() => Ok(Module {
            name,
            plugins: record.plugins.iter().map(|p| p.trim().to_string()).collect(),
            repositories: record.repositories.clone(),
            dependencies,
            toolchain_floor,
            test_suites,
            reports,
        }),
        _ => Err(violations),
    }
}

fn record_name(index: usize, record: &RawDescriptor) -> Result<ModuleName, Violation> {
    match record.name.as_deref().map(str::trim) {
        None | Some("") => Err(Violation::malformed(index, "name", "is required")),
        Some(raw) => ModuleName::new(raw).map_err(|e| Violation::malformed(index, "name", reason(e))),
    }
}

fn dependency(
    record: usize,
    position: usize,
    raw: &RawDependency,
    violations: &mut Vec<Violation>,
) -> Option<DependencyReference> {
    let field = format!("dependencies[{position}].target");
    let target = match raw.target.as_deref().map(str::trim) {
        None | Some("") => {
            violations.push(Violation::malformed(record, field, "is required"));
            return None;
        }
        Some(target) => target,
    };

    match DependencyTarget::classify(target) {
        Ok(target) => {
            let scope = raw
                .scope
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SCOPE);
            Some(DependencyReference::new(target, Scope::from(scope.to_string())))
        }
        Err(e) => {
            violations.push(Violation::malformed(record, field, reason(e)));
            None
        }
    }
}

fn test_suite(
    record: usize,
    position: usize,
    raw: &RawTestSuite,
    violations: &mut Vec<Violation>,
) -> Option<TestSuite> {
    let Some(name) = required(raw.name.as_deref()) else {
        violations.push(Violation::malformed(
            record,
            format!("testSuites[{position}].name"),
            "is required",
        ));
        return None;
    };

    let kind = required(raw.kind.as_deref()).unwrap_or(DEFAULT_SUITE_KIND);
    Some(TestSuite {
        name: name.to_string(),
        kind: SuiteKind::from(kind.to_string()),
        engine: required(raw.engine.as_deref()).map(str::to_string),
    })
}

fn report_entry(
    record: usize,
    position: usize,
    raw: &RawReport,
    violations: &mut Vec<Violation>,
) -> Option<Report> {
    let name = required(raw.name.as_deref());
    let suite = required(raw.test_suite.as_deref());

    if name.is_none() {
        violations.push(Violation::malformed(
            record,
            format!("reports[{position}].name"),
            "is required",
        ));
    }
    if suite.is_none() {
        violations.push(Violation::malformed(
            record,
            format!("reports[{position}].testSuite"),
            "is required",
        ));
    }

    Some(Report {
        name: name?.to_string(),
        kind: required(raw.kind.as_deref())
            .unwrap_or("coverage")
            .to_string(),
        test_suite: suite?.to_string(),
    })
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Message without the "configuration error:" prefix the core error adds
fn reason(error: Error) -> String {
    match error {
        Error::Configuration { message } => message,
        other => other.to_string(),
    }
}
