//! Graph validation
//!
//! Checks the rules that span modules. Validation only reads the graph; the
//! result is either a [`ValidatedGraph`] view or the complete list of
//! violations.

use crate::cycles::find_cycles;
use buildplan_core::{
    DependencyTarget, Module, ModuleGraph, ModuleName, Result, Violation, Violations,
};
use std::collections::HashSet;
use std::ops::Deref;

/// A module graph that passed validation
///
/// Only [`validate`] constructs this, so holders may rely on every internal
/// reference resolving and on the internal edges being acyclic.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedGraph<'g> {
    graph: &'g ModuleGraph,
}

impl Deref for ValidatedGraph<'_> {
    type Target = ModuleGraph;

    fn deref(&self) -> &Self::Target {
        self.graph
    }
}

/// Validate a graph, returning every violation found
pub fn validate(graph: &ModuleGraph) -> Result<ValidatedGraph<'_>> {
    let _span = tracing::info_span!("validate", modules = graph.len()).entered();

    let violations = check(graph);
    if violations.is_empty() {
        tracing::info!(modules = graph.len(), "module graph is valid");
    } else {
        tracing::info!(violations = violations.len(), "module graph has violations");
    }
    violations.into_result(ValidatedGraph { graph })
}

/// Collect every violation in the graph
///
/// Per-module checks run in declaration order, cycles are appended last.
pub fn check(graph: &ModuleGraph) -> Violations {
    let mut violations = Violations::new();

    for module in graph.modules() {
        violations.extend(unresolved_dependencies(graph, module));
        violations.extend(duplicate_test_suites(module));
        violations.extend(unknown_report_suites(graph, module));
    }
    violations.extend(find_cycles(graph));

    violations
}

/// Internal targets that are not declared and catalog aliases with no entry
pub fn unresolved_dependencies(graph: &ModuleGraph, module: &Module) -> Vec<Violation> {
    let mut seen: HashSet<String> = HashSet::new();
    module
        .dependencies
        .iter()
        .filter(|dep| match &dep.target {
            DependencyTarget::Module(name) => !graph.contains(name.as_str()),
            DependencyTarget::Catalog(alias) => graph.catalog().resolve(alias).is_none(),
            DependencyTarget::External(_) => false,
        })
        .map(|dep| dep.target.to_string())
        .filter(|target| seen.insert(target.clone()))
        .map(|target| Violation::UnresolvedDependency {
            module: module.name.to_string(),
            target,
        })
        .collect()
}

/// Test suite names declared more than once, each reported once
pub fn duplicate_test_suites(module: &Module) -> Vec<Violation> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    let mut violations = Vec::new();

    for suite in &module.test_suites {
        if !seen.insert(suite.name.as_str()) && reported.insert(suite.name.as_str()) {
            violations.push(Violation::DuplicateTestSuite {
                module: module.name.to_string(),
                suite: suite.name.clone(),
            });
        }
    }

    violations
}

/// Reports whose suite no covered module declares
///
/// A report covers its own module plus every module reachable from its
/// `aggregation` dependencies.
pub fn unknown_report_suites(graph: &ModuleGraph, module: &Module) -> Vec<Violation> {
    if module.reports.is_empty() {
        return Vec::new();
    }

    let covered = covered_modules(graph, module);
    module
        .reports
        .iter()
        .filter(|report| {
            !covered
                .iter()
                .filter_map(|name| graph.get(name.as_str()))
                .any(|m| m.declares_suite(&report.test_suite))
        })
        .map(|report| Violation::UnknownReportSuite {
            module: module.name.to_string(),
            report: report.name.clone(),
            suite: report.test_suite.clone(),
        })
        .collect()
}

fn covered_modules<'g>(graph: &'g ModuleGraph, module: &'g Module) -> Vec<&'g ModuleName> {
    let mut covered: Vec<&ModuleName> = vec![&module.name];
    let mut seen: HashSet<&str> = HashSet::from([module.name.as_str()]);
    let mut pending: Vec<&ModuleName> = module.aggregated_modules().collect();

    while let Some(name) = pending.pop() {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let Some(found) = graph.get(name.as_str()) else {
            continue;
        };
        covered.push(&found.name);
        pending.extend(found.internal_dependencies());
    }

    covered
}
