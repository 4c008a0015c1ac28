//! Deterministic topological ordering of modules

use buildplan_core::{ModuleGraph, ModuleName};
use std::collections::{BTreeSet, HashMap};

/// Order modules so every dependency precedes its dependents
///
/// Repeatedly removes a module with no remaining dependencies; when several
/// are ready, the smallest name goes first. Modules caught in a cycle never
/// become ready and are left out, so callers compare the length against the
/// graph to detect that case.
pub fn topological_order(graph: &ModuleGraph) -> Vec<ModuleName> {
    let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(graph.len());
    let mut dependents: HashMap<&str, Vec<&ModuleName>> = HashMap::with_capacity(graph.len());

    for module in graph.modules() {
        let deps: Vec<&ModuleName> = module
            .internal_dependencies()
            .into_iter()
            .filter(|dep| graph.contains(dep.as_str()))
            .collect();
        in_degree.insert(module.name.as_str(), deps.len());
        for dep in deps {
            dependents.entry(dep.as_str()).or_default().push(&module.name);
        }
    }

    let mut ready: BTreeSet<&ModuleName> = graph
        .modules()
        .filter(|m| in_degree.get(m.name.as_str()) == Some(&0))
        .map(|m| &m.name)
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(next) = ready.pop_first() {
        if let Some(waiting) = dependents.get(next.as_str()) {
            for dependent in waiting {
                if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }
        order.push(next.clone());
    }

    order
}

/// Group modules by dependency depth
///
/// Level 0 holds modules without internal dependencies; every other module
/// sits one level above its deepest dependency. Each level is sorted by name.
/// `order` must be a topological order of `graph`.
pub fn execution_levels(graph: &ModuleGraph, order: &[ModuleName]) -> Vec<Vec<ModuleName>> {
    let mut depth: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    let mut levels: Vec<Vec<ModuleName>> = Vec::new();

    for name in order {
        let level = graph
            .get(name.as_str())
            .map(|module| {
                module
                    .internal_dependencies()
                    .iter()
                    .filter_map(|dep| depth.get(dep.as_str()))
                    .map(|d| d + 1)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);

        depth.insert(name.as_str(), level);
        if levels.len() <= level {
            levels.resize_with(level + 1, Vec::new);
        }
        levels[level].push(name.clone());
    }

    for level in &mut levels {
        level.sort();
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildplan_core::{DependencyReference, DependencyTarget, Module, Scope};

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

    fn names(order: &[ModuleName]) -> Vec<&str> {
        order.iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn test_dependency_first() {
        let g = graph(&[("B", &["A"]), ("A", &[])]);
        assert_eq!(names(&topological_order(&g)), vec!["A", "B"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let g = graph(&[("zeta", &[]), ("alpha", &[]), ("mid", &["zeta"])]);
        assert_eq!(names(&topological_order(&g)), vec!["alpha", "zeta", "mid"]);
    }

    #[test]
    fn test_smallest_ready_module_first() {
        // b becomes ready after a; it still sorts before c which was ready earlier
        let g = graph(&[("a", &[]), ("c", &[]), ("b", &["a"])]);
        assert_eq!(names(&topological_order(&g)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cycle_members_left_out() {
        let g = graph(&[("a", &[]), ("b", &["c"]), ("c", &["b"])]);
        assert_eq!(names(&topological_order(&g)), vec!["a"]);
    }

    #[test]
    fn test_duplicate_edges_counted_once() {
        let mut app = Module::new(ModuleName::new("app").unwrap());
        let lib = ModuleName::new("lib").unwrap();
        app.dependencies = vec![
            DependencyReference::new(DependencyTarget::Module(lib.clone()), Scope::Implementation),
            DependencyReference::new(DependencyTarget::Module(lib.clone()), Scope::TestImplementation),
        ];
        let g = ModuleGraph::from_modules(vec![app, Module::new(lib)]).unwrap();
        assert_eq!(names(&topological_order(&g)), vec!["lib", "app"]);
    }

    #[test]
    fn test_levels() {
        let g = graph(&[
            ("app", &["lib", "util"]),
            ("lib", &["util"]),
            ("util", &[]),
            ("docs", &[]),
        ]);
        let order = topological_order(&g);
        let levels = execution_levels(&g, &order);
        let levels: Vec<Vec<&str>> = levels.iter().map(|l| names(l)).collect();
        assert_eq!(levels, vec![vec!["docs", "util"], vec!["lib"], vec!["app"]]);
    }
}
