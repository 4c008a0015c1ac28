//! Build plan emission
//!
//! Emission is total: once a graph has been validated, every input yields a
//! plan and nothing here can fail.

use crate::topology::{execution_levels, topological_order};
use crate::validation::{validate, ValidatedGraph};
use buildplan_core::{
    BuildPlan, Coordinate, DependencyTarget, ModuleGraph, PlannedReport, PlannedTestSuite,
    Result,
};
use std::collections::{BTreeSet, HashSet};

/// Derive the build plan for a validated graph
pub fn emit(graph: &ValidatedGraph<'_>) -> BuildPlan {
    let _span = tracing::info_span!("emit", modules = graph.len()).entered();

    let order = topological_order(graph);
    let levels = execution_levels(graph, &order);

    let mut plan = BuildPlan {
        levels,
        toolchain_floor: graph
            .modules()
            .filter_map(|m| m.toolchain_floor.as_ref())
            .max()
            .cloned(),
        external_dependencies: external_dependencies(graph),
        ..BuildPlan::default()
    };

    let mut repositories: HashSet<&str> = HashSet::new();
    for name in &order {
        let Some(module) = graph.get(name.as_str()) else {
            continue;
        };
        plan.test_suites
            .extend(module.test_suites.iter().map(|s| PlannedTestSuite::new(name, s)));
        plan.reports
            .extend(module.reports.iter().map(|r| PlannedReport::new(name, r)));
        for repository in &module.repositories {
            if repositories.insert(repository.as_str()) {
                plan.repositories.push(repository.clone());
            }
        }
    }
    plan.order = order;

    tracing::info!(
        modules = plan.order.len(),
        levels = plan.levels.len(),
        test_suites = plan.test_suites.len(),
        toolchain_floor = plan.toolchain_floor.as_ref().map(|v| v.as_str()),
        "build plan emitted"
    );
    plan
}

/// Validate then emit
pub fn plan(graph: &ModuleGraph) -> Result<BuildPlan> {
    let validated = validate(graph)?;
    Ok(emit(&validated))
}

/// External coordinates in ascending order, catalog aliases resolved
fn external_dependencies(graph: &ModuleGraph) -> Vec<Coordinate> {
    let mut coordinates: BTreeSet<&Coordinate> = BTreeSet::new();
    for module in graph.modules() {
        for dep in &module.dependencies {
            match &dep.target {
                DependencyTarget::External(coordinate) => {
                    coordinates.insert(coordinate);
                }
                DependencyTarget::Catalog(alias) => {
                    if let Some(coordinate) = graph.catalog().resolve(alias) {
                        coordinates.insert(coordinate);
                    }
                }
                DependencyTarget::Module(_) => {}
            }
        }
    }
    coordinates.into_iter().cloned().collect()
}
