//! Module descriptors after loading
//!
//! These are the immutable, validated-shape forms of descriptor records. Graph
//! rules that span modules (resolution, cycles) are checked later by the
//! validator; everything here is local to one record.

use super::newtypes::{Coordinate, ModuleName};
use super::version::ToolchainVersion;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking version catalog aliases, as in `libs.guice`
pub const CATALOG_PREFIX: &str = "libs.";

/// Configuration a dependency is declared in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    #[default]
    Implementation,
    Api,
    CompileOnly,
    RuntimeOnly,
    TestImplementation,
    TestRuntimeOnly,
    Aggregation,
    Other(String),
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Scope::Implementation => "implementation",
            Scope::Api => "api",
            Scope::CompileOnly => "compileOnly",
            Scope::RuntimeOnly => "runtimeOnly",
            Scope::TestImplementation => "testImplementation",
            Scope::TestRuntimeOnly => "testRuntimeOnly",
            Scope::Aggregation => "aggregation",
            Scope::Other(tag) => tag,
        }
    }

    /// Whether the scope only matters when building tests
    pub fn is_test(&self) -> bool {
        matches!(self, Scope::TestImplementation | Scope::TestRuntimeOnly)
    }
}

impl From<String> for Scope {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "implementation" => Scope::Implementation,
            "api" => Scope::Api,
            "compileOnly" => Scope::CompileOnly,
            "runtimeOnly" => Scope::RuntimeOnly,
            "testImplementation" => Scope::TestImplementation,
            "testRuntimeOnly" => Scope::TestRuntimeOnly,
            // the coverage plugin names its configuration after itself
            "aggregation" | "jacocoAggregation" => Scope::Aggregation,
            _ => Scope::Other(tag),
        }
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a dependency points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyTarget {
    /// Another module in the graph
    Module(ModuleName),
    /// A leaf artifact outside the graph
    External(Coordinate),
    /// A catalog alias, stored without the `libs.` prefix
    Catalog(String),
}

impl DependencyTarget {
    /// Classify a raw target string
    ///
    /// `libs.x` is a catalog alias, `group:artifact[:version]` an external
    /// coordinate, and anything else (optionally written `:name` or
    /// `project(":name")`) a module name.
    pub fn classify(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Some(alias) = raw.strip_prefix(CATALOG_PREFIX) {
            if !alias.is_empty() {
                return Ok(DependencyTarget::Catalog(alias.to_string()));
            }
        }

        let unwrapped = raw
            .strip_prefix("project(")
            .and_then(|inner| inner.strip_suffix(')'))
            .map(|inner| inner.trim().trim_matches('"'))
            .unwrap_or(raw);

        if Coordinate::looks_like(unwrapped) {
            return Ok(DependencyTarget::External(Coordinate::new(unwrapped)?));
        }

        Ok(DependencyTarget::Module(ModuleName::new(unwrapped)?))
    }

    pub fn as_module(&self) -> Option<&ModuleName> {
        match self {
            DependencyTarget::Module(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, DependencyTarget::Module(_))
    }
}

impl fmt::Display for DependencyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyTarget::Module(name) => write!(f, "{name}"),
            DependencyTarget::External(coordinate) => write!(f, "{coordinate}"),
            DependencyTarget::Catalog(alias) => write!(f, "{CATALOG_PREFIX}{alias}"),
        }
    }
}

impl Serialize for DependencyTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyReference {
    pub target: DependencyTarget,
    pub scope: Scope,
}

impl DependencyReference {
    pub fn new(target: DependencyTarget, scope: Scope) -> Self {
        Self { target, scope }
    }
}

/// Kind of test suite
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SuiteKind {
    #[default]
    Unit,
    Integration,
    AggregationReport,
    Other(String),
}

impl SuiteKind {
    pub fn as_str(&self) -> &str {
        match self {
            SuiteKind::Unit => "unit",
            SuiteKind::Integration => "integration",
            SuiteKind::AggregationReport => "aggregation-report",
            SuiteKind::Other(tag) => tag,
        }
    }
}

impl From<String> for SuiteKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "unit" => SuiteKind::Unit,
            "integration" => SuiteKind::Integration,
            "aggregation-report" => SuiteKind::AggregationReport,
            _ => SuiteKind::Other(tag),
        }
    }
}

impl From<SuiteKind> for String {
    fn from(kind: SuiteKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed collection of tests owned by a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TestSuite {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SuiteKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

/// An aggregation (e.g. a coverage report) over one test suite
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub test_suite: String,
}

/// A named unit of build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub name: ModuleName,
    pub plugins: Vec<String>,
    pub repositories: Vec<String>,
    pub dependencies: Vec<DependencyReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain_floor: Option<ToolchainVersion>,
    pub test_suites: Vec<TestSuite>,
    pub reports: Vec<Report>,
}

impl Module {
    /// A module with no plugins, dependencies or suites
    pub fn new(name: ModuleName) -> Self {
        Self {
            name,
            plugins: Vec::new(),
            repositories: Vec::new(),
            dependencies: Vec::new(),
            toolchain_floor: None,
            test_suites: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// Names of modules this one depends on, in declaration order, without repeats
    pub fn internal_dependencies(&self) -> Vec<&ModuleName> {
        let mut names: Vec<&ModuleName> = Vec::with_capacity(self.dependencies.len());
        for name in self.dependencies.iter().filter_map(|d| d.target.as_module()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Modules reached through `aggregation`-scoped dependencies
    pub fn aggregated_modules(&self) -> impl Iterator<Item = &ModuleName> {
        self.dependencies
            .iter()
            .filter(|d| d.scope == Scope::Aggregation)
            .filter_map(|d| d.target.as_module())
    }

    pub fn declares_suite(&self, name: &str) -> bool {
        self.test_suites.iter().any(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lib", "lib")]
    #[case(":lib", "lib")]
    #[case("project(\":lib\")", "lib")]
    fn test_classify_module(#[case] raw: &str, #[case] expected: &str) {
        let target = DependencyTarget::classify(raw).unwrap();
        assert_eq!(target.as_module().map(|n| n.as_str()), Some(expected));
    }

    #[test]
    fn test_classify_external_and_catalog() {
        assert_eq!(
            DependencyTarget::classify("com.google.inject:guice:7.0.0").unwrap(),
            DependencyTarget::External(Coordinate::new("com.google.inject:guice:7.0.0").unwrap())
        );
        assert_eq!(
            DependencyTarget::classify("libs.spock.core").unwrap(),
            DependencyTarget::Catalog("spock.core".to_string())
        );
        assert_eq!(
            DependencyTarget::classify("libs.groovy").unwrap().to_string(),
            "libs.groovy"
        );
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert!(DependencyTarget::classify("").is_err());
        assert!(DependencyTarget::classify("not a module").is_err());
        assert!(DependencyTarget::classify("a::b").is_err());
    }

    #[test]
    fn test_scope_round_trip_keeps_unknown_tags() {
        assert_eq!(Scope::from("testImplementation".to_string()), Scope::TestImplementation);
        assert_eq!(Scope::from("jacocoAggregation".to_string()), Scope::Aggregation);
        let custom = Scope::from("annotationProcessor".to_string());
        assert_eq!(custom.to_string(), "annotationProcessor");
        assert!(!custom.is_test());
    }

    #[test]
    fn test_internal_dependencies_dedupes() {
        let lib = ModuleName::new("lib").unwrap();
        let mut module = Module::new(ModuleName::new("app").unwrap());
        module.dependencies = vec![
            DependencyReference::new(DependencyTarget::Module(lib.clone()), Scope::Implementation),
            DependencyReference::new(DependencyTarget::Module(lib.clone()), Scope::TestImplementation),
            DependencyReference::new(DependencyTarget::Catalog("guice".into()), Scope::Implementation),
        ];
        assert_eq!(module.internal_dependencies(), vec![&lib]);
        assert_eq!(module.aggregated_modules().count(), 0);
    }

    #[test]
    fn test_suite_serializes_type_key() {
        let suite = TestSuite {
            name: "test".to_string(),
            kind: SuiteKind::Unit,
            engine: Some("spock".to_string()),
        };
        let value = serde_json::to_value(&suite).unwrap();
        assert_eq!(value["type"], "unit");
        assert_eq!(value["engine"], "spock");
    }
}
