//! Cycle detection over internal dependency edges

use buildplan_core::{ModuleGraph, Violation};
use std::collections::{BTreeSet, HashSet};

/// Find dependency cycles
///
/// Depth-first traversal from every module in ascending name order, keeping
/// the current path on a recursion stack; reaching a module that is still on
/// the stack closes a cycle. Each cycle is rotated to start at its smallest
/// name and reported once. Edges to undeclared modules are ignored here.
pub fn find_cycles(graph: &ModuleGraph) -> Vec<Violation> {
    let mut finder = CycleFinder {
        graph,
        visited: HashSet::with_capacity(graph.len()),
        stack: Vec::new(),
        on_stack: HashSet::new(),
        cycles: BTreeSet::new(),
    };

    for name in graph.sorted_names() {
        finder.visit(name.as_str());
    }

    finder
        .cycles
        .into_iter()
        .map(|cycle| Violation::CyclicDependency { cycle })
        .collect()
}

struct CycleFinder<'g> {
    graph: &'g ModuleGraph,
    visited: HashSet<&'g str>,
    stack: Vec<&'g str>,
    on_stack: HashSet<&'g str>,
    cycles: BTreeSet<Vec<String>>,
}

impl<'g> CycleFinder<'g> {
    fn visit(&mut self, name: &'g str) {
        if self.on_stack.contains(name) {
            if let Some(start) = self.stack.iter().position(|n| *n == name) {
                let path = self.stack[start..].to_vec();
                self.record(&path);
            }
            return;
        }

        if self.visited.contains(name) {
            return;
        }

        let graph = self.graph;
        let Some(module) = graph.get(name) else {
            return;
        };

        self.visited.insert(name);
        self.stack.push(name);
        self.on_stack.insert(name);

        for dependency in module.internal_dependencies() {
            self.visit(dependency.as_str());
        }

        self.stack.pop();
        self.on_stack.remove(name);
    }

    fn record(&mut self, path: &[&str]) {
        let mut cycle: Vec<String> = path.iter().map(|n| n.to_string()).collect();
        if let Some(min) = cycle
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(i, _)| i)
        {
            cycle.rotate_left(min);
        }
        tracing::debug!(cycle = %cycle.join(","), "dependency cycle detected");
        self.cycles.insert(cycle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildplan_core::{DependencyReference, DependencyTarget, Module, ModuleName, Scope};

    fn graph(edges: &[(&str, &[&str])]) -> ModuleGraph {
        let modules = edges.iter().map(|(name, deps)| {
            let mut module = Module::new(ModuleName::new(*name).unwrap());
            module.dependencies = deps
                .iter()
                .map(|d| {
                    DependencyReference::new(
                        DependencyTarget::Module(ModuleName::new(*d).unwrap()),
                        Scope::Implementation,
                    )
                })
                .collect();
            module
        });
        ModuleGraph::from_modules(modules).unwrap()
    }

    fn cycles(g: &ModuleGraph) -> Vec<Vec<String>> {
        find_cycles(g)
            .into_iter()
            .map(|v| match v {
                Violation::CyclicDependency { cycle } => cycle,
                other => panic!("unexpected violation {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_acyclic() {
        let g = graph(&[("A", &[]), ("B", &["A"]), ("C", &["A", "B"])]);
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_two_module_cycle() {
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(cycles(&g), vec![vec!["A".to_string(), "B".to_string()]]);
        assert_eq!(
            find_cycles(&g)[0].to_string(),
            "cyclic dependency between modules A,B"
        );
    }

    #[test]
    fn test_self_dependency() {
        let g = graph(&[("A", &["A"])]);
        assert_eq!(cycles(&g), vec![vec!["A".to_string()]]);
    }

    #[test]
    fn test_cycle_rotated_to_smallest_name() {
        let g = graph(&[("root", &["z"]), ("z", &["m"]), ("m", &["x"]), ("x", &["m"])]);
        assert_eq!(cycles(&g), vec![vec!["m".to_string(), "x".to_string()]]);
    }

    #[test]
    fn test_disjoint_cycles_each_reported() {
        let g = graph(&[("a", &["b"]), ("b", &["a"]), ("c", &["d"]), ("d", &["c"])]);
        assert_eq!(cycles(&g).len(), 2);
    }

    #[test]
    fn test_unresolved_edges_ignored() {
        let g = graph(&[("a", &["ghost"])]);
        assert!(find_cycles(&g).is_empty());
    }
}
