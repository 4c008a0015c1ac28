use crate::formats::{plan_edges, PlanFormatter};
use buildplan_core::{BuildPlan, ModuleGraph, Result};
use std::collections::HashSet;

pub struct MermaidFormatter {}

/// Mermaid node id for a module name
///
/// `_` is doubled before `-` and `.` are rewritten, so distinct names never
/// share an id.
fn node_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '_' => id.push_str("__"),
            '-' => id.push_str("_h"),
            '.' => id.push_str("_d"),
            other => id.push(other),
        }
    }
    id
}

impl MermaidFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl PlanFormatter for MermaidFormatter {
    fn format_plan(&self, plan: &BuildPlan, graph: &ModuleGraph) -> Result<String> {
        let mut output = String::from("graph LR\n");

        for name in &plan.order {
            output.push_str(&format!("  {}[\"{name}\"]\n", node_id(name.as_str())));
        }
        output.push('\n');

        let mut added_edges: HashSet<(String, String)> = HashSet::new();
        for (dependency, dependent) in plan_edges(plan, graph) {
            let edge = (node_id(dependency), node_id(dependent));
            if added_edges.insert(edge.clone()) {
                output.push_str(&format!("  {} --> {}\n", edge.0, edge.1));
            }
        }

        let reporting: Vec<String> = plan
            .order
            .iter()
            .filter(|name| {
                graph
                    .get(name.as_str())
                    .is_some_and(|m| !m.reports.is_empty())
            })
            .map(|name| node_id(name.as_str()))
            .collect();
        if !reporting.is_empty() {
            output.push('\n');
            output.push_str("  classDef report fill:#e1f5fe\n");
            output.push_str(&format!("  class {} report\n", reporting.join(",")));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fixtures;
    use buildplan_config::{load_records, RawDescriptor};

    #[test]
    fn test_mermaid_output() {
        let (plan, graph) = fixtures::sample();
        let output = MermaidFormatter::new().format_plan(&plan, &graph).unwrap();

        let expected = "graph LR\n  \
            core[\"core\"]\n  \
            app[\"app\"]\n  \
            code_hcoverage[\"code-coverage\"]\n\
            \n  \
            core --> app\n  \
            core --> code_hcoverage\n\
            \n  \
            classDef report fill:#e1f5fe\n  \
            class code_hcoverage report\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_node_ids_do_not_collide() {
        let ids: Vec<String> = ["a-b", "a_b", "a.b", "a_hb", "a__b"]
            .iter()
            .map(|n| node_id(n))
            .collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());

        let graph = load_records(vec![
            RawDescriptor::named("a-b"),
            RawDescriptor::named("a_b").depends_on("a-b", "implementation"),
        ])
        .unwrap();
        let plan = buildplan_graph::plan(&graph).unwrap();
        let output = MermaidFormatter::new().format_plan(&plan, &graph).unwrap();
        assert!(output.contains("  a_hb[\"a-b\"]\n"));
        assert!(output.contains("  a__b[\"a_b\"]\n"));
        assert!(output.contains("  a_hb --> a__b\n"));
    }
}
