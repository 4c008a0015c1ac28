//! The loaded module graph

use super::module::Module;
use super::newtypes::{Coordinate, ModuleName};
use crate::errors::{Violation, Violations};
use indexmap::IndexMap;
use serde::Serialize;

/// Version catalog mapping aliases to external coordinates
///
/// Aliases are matched with `-`, `_` and `.` treated as the same separator, so
/// a catalog entry `spock-core` answers to `libs.spock.core`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog(IndexMap<String, Coordinate>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized lookup key for an alias
    pub fn key(alias: &str) -> String {
        alias.replace(['-', '_'], ".")
    }

    /// Insert an entry; later inserts for the same alias win
    pub fn insert(&mut self, alias: &str, coordinate: Coordinate) {
        self.0.insert(Self::key(alias), coordinate);
    }

    pub fn resolve(&self, alias: &str) -> Option<&Coordinate> {
        self.0.get(&Self::key(alias))
    }

    pub fn merge(&mut self, other: Catalog) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Coordinate)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Modules by name in declaration order, plus the catalog they resolve against
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleName, Module>,
    catalog: Catalog,
}

impl ModuleGraph {
    /// Build a graph, rejecting every repeated module name
    ///
    /// Either all modules are accepted or none are.
    pub fn from_modules(
        modules: impl IntoIterator<Item = Module>,
    ) -> std::result::Result<Self, Violations> {
        let mut map: IndexMap<ModuleName, Module> = IndexMap::new();
        let mut violations = Violations::new();
        let mut reported: Vec<ModuleName> = Vec::new();

        for module in modules {
            if map.contains_key(&module.name) {
                if !reported.contains(&module.name) {
                    violations.push(Violation::DuplicateModule {
                        name: module.name.to_string(),
                    });
                    reported.push(module.name.clone());
                }
                continue;
            }
            map.insert(module.name.clone(), module);
        }

        if violations.is_empty() {
            Ok(Self {
                modules: map,
                catalog: Catalog::new(),
            })
        } else {
            Err(violations)
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Module names in ascending order
    pub fn sorted_names(&self) -> Vec<&ModuleName> {
        let mut names: Vec<&ModuleName> = self.modules.keys().collect();
        names.sort();
        names
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
