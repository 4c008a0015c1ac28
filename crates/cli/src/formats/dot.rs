use crate::formats::{plan_edges, PlanFormatter};
use buildplan_core::{BuildPlan, ModuleGraph, Result};
use std::collections::HashSet;

/// Graphviz rendering; report modules are highlighted
///
/// Module names only use characters that are literal inside a quoted DOT id,
/// so the name itself is the node id.
pub struct DotFormatter {}

impl DotFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl PlanFormatter for DotFormatter {
    fn format_plan(&self, plan: &BuildPlan, graph: &ModuleGraph) -> Result<String> {
        let mut output = String::new();

        output.push_str("digraph modules {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box];\n\n");

        for name in &plan.order {
            let has_reports = graph
                .get(name.as_str())
                .is_some_and(|m| !m.reports.is_empty());
            if has_reports {
                output.push_str(&format!(
                    "  \"{name}\" [label=\"{name}\", shape=hexagon, style=filled, fillcolor=\"#e1f5fe\"];\n"
                ));
            } else {
                output.push_str(&format!("  \"{name}\" [label=\"{name}\"];\n"));
            }
        }
        output.push('\n');

        let mut added_edges: HashSet<(&str, &str)> = HashSet::new();
        for (dependency, dependent) in plan_edges(plan, graph) {
            if added_edges.insert((dependency, dependent)) {
                output.push_str(&format!("  \"{dependency}\" -> \"{dependent}\";\n"));
            }
        }

        output.push_str("}\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fixtures;
    use buildplan_config::{load_records, RawDescriptor};

    #[test]
    fn test_dot_output() {
        let (plan, graph) = fixtures::sample();
        let output = DotFormatter::new().format_plan(&plan, &graph).unwrap();

        assert!(output.starts_with("digraph modules {\n"));
        assert!(output.contains("  \"code-coverage\" [label=\"code-coverage\", shape=hexagon"));
        assert!(output.contains("  \"core\" -> \"app\";\n"));
        assert!(output.contains("  \"core\" -> \"code-coverage\";\n"));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_similar_names_stay_distinct() {
        let graph = load_records(vec![
            RawDescriptor::named("a-b"),
            RawDescriptor::named("a_b").depends_on("a-b", "implementation"),
            RawDescriptor::named("a.b"),
        ])
        .unwrap();
        let plan = buildplan_graph::plan(&graph).unwrap();
        let output = DotFormatter::new().format_plan(&plan, &graph).unwrap();

        assert!(output.contains("  \"a-b\" [label=\"a-b\"];\n"));
        assert!(output.contains("  \"a_b\" [label=\"a_b\"];\n"));
        assert!(output.contains("  \"a.b\" [label=\"a.b\"];\n"));
        assert!(output.contains("  \"a-b\" -> \"a_b\";\n"));
    }
}
