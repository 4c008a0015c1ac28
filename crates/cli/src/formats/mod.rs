//! Build plan renderers

pub mod dot;
pub mod json;
pub mod mermaid;
pub mod tree;

use buildplan_core::{BuildPlan, ModuleGraph, Result};

/// Supported plan output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Json,
    Tree,
    Dot,
    Mermaid,
}

impl PlanFormat {
    /// Parse format from string, defaulting to Json if None or invalid
    pub fn from_option(format: Option<&str>) -> Self {
        match format {
            Some("tree") => PlanFormat::Tree,
            Some("dot") => PlanFormat::Dot,
            Some("mermaid") => PlanFormat::Mermaid,
            Some("json") | None => PlanFormat::Json,
            Some(other) => {
                tracing::warn!(format = other, "unknown plan format, using json");
                PlanFormat::Json
            }
        }
    }
}

/// Character set options for tree format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

impl CharSet {
    pub fn from_name(charset: &str) -> Self {
        match charset {
            "ascii" => CharSet::Ascii,
            _ => CharSet::Unicode,
        }
    }
}

/// Renders a build plan as text
pub trait PlanFormatter {
    /// Format the plan; `graph` supplies the dependency edges
    fn format_plan(&self, plan: &BuildPlan, graph: &ModuleGraph) -> Result<String>;
}

/// Render `plan` in the requested format
pub fn render(
    plan: &BuildPlan,
    graph: &ModuleGraph,
    format: PlanFormat,
    charset: CharSet,
) -> Result<String> {
    match format {
        PlanFormat::Json => json::JsonFormatter::new().format_plan(plan, graph),
        PlanFormat::Tree => tree::TreeFormatter::new(charset).format_plan(plan, graph),
        PlanFormat::Dot => dot::DotFormatter::new().format_plan(plan, graph),
        PlanFormat::Mermaid => mermaid::MermaidFormatter::new().format_plan(plan, graph),
    }
}

/// Internal edges as `(dependency, dependent)` pairs, dependents in plan order
pub(crate) fn plan_edges<'a>(plan: &'a BuildPlan, graph: &'a ModuleGraph) -> Vec<(&'a str, &'a str)> {
    plan.order
        .iter()
        .filter_map(|name| graph.get(name.as_str()))
        .flat_map(|module| {
            module
                .internal_dependencies()
                .into_iter()
                .map(move |dep| (dep.as_str(), module.name.as_str()))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use buildplan_config::{load_records, RawDescriptor, RawReport};
    use buildplan_core::{BuildPlan, ModuleGraph};

    /// `core` <- `app`, plus a coverage module aggregating `core`
    pub fn sample() -> (BuildPlan, ModuleGraph) {
        let mut coverage =
            RawDescriptor::named("code-coverage").depends_on(":core", "aggregation");
        coverage.reports.push(RawReport {
            name: Some("testCodeCoverageReport".to_string()),
            kind: Some("jacoco-coverage".to_string()),
            test_suite: Some("test".to_string()),
        });

        let graph = load_records(vec![
            RawDescriptor::named("app")
                .depends_on("core", "implementation")
                .toolchain("21"),
            RawDescriptor::named("core").suite("test", "unit").toolchain("17"),
            coverage,
        ])
        .unwrap();
        let plan = buildplan_graph::plan(&graph).unwrap();
        (plan, graph)
    }
}
