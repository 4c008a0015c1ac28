//! The build plan handed to the build-execution collaborator

use super::module::{Report, SuiteKind, TestSuite};
use super::newtypes::{Coordinate, ModuleName};
use super::version::ToolchainVersion;
use serde::{Deserialize, Serialize};

/// A test suite to run, tagged with its owning module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTestSuite {
    pub module: ModuleName,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SuiteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

impl PlannedTestSuite {
    pub fn new(module: &ModuleName, suite: &TestSuite) -> Self {
        Self {
            module: module.clone(),
            name: suite.name.clone(),
            kind: suite.kind.clone(),
            engine: suite.engine.clone(),
        }
    }
}

/// A report to produce, tagged with its owning module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedReport {
    pub module: ModuleName,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub test_suite: String,
}

impl PlannedReport {
    pub fn new(module: &ModuleName, report: &Report) -> Self {
        Self {
            module: module.clone(),
            name: report.name.clone(),
            kind: report.kind.clone(),
            test_suite: report.test_suite.clone(),
        }
    }
}

/// Resolved, ordered execution artifact derived from a validated graph
///
/// A plan is a value: planning again yields a new plan, never an update to
/// an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
    /// Every module once, dependencies before dependents
    pub order: Vec<ModuleName>,
    /// Modules grouped by dependency depth; members of a level are independent
    #[serde(default)]
    pub levels: Vec<Vec<ModuleName>>,
    /// Highest floor declared by any module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolchain_floor: Option<ToolchainVersion>,
    pub test_suites: Vec<PlannedTestSuite>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub external_dependencies: Vec<Coordinate>,
    #[serde(default)]
    pub reports: Vec<PlannedReport>,
}

impl BuildPlan {
    pub fn position(&self, module: &str) -> Option<usize> {
        self.order.iter().position(|m| m.as_str() == module)
    }

    pub fn suites_for<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a PlannedTestSuite> {
        self.test_suites.iter().filter(move |s| s.module.as_str() == module)
    }
}
