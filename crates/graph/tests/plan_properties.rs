//! Property and scenario tests for the load, validate, emit pipeline

use buildplan_config::{load_records, RawDescriptor, RawReport};
use buildplan_core::{BuildPlan, Violation};
use buildplan_graph::{plan, validate};
use proptest::prelude::*;
use std::collections::HashMap;

/// Acyclic record sets: module `i` may only depend on modules with a smaller index
fn arb_acyclic_records() -> impl Strategy<Value = Vec<RawDescriptor>> {
    (1usize..12)
        .prop_flat_map(|n| {
            let edges = (0..n)
                .map(|i| prop::collection::vec(0..i.max(1), 0..=i.min(4)))
                .collect::<Vec<_>>();
            (edges, Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
        })
        .prop_map(|(edges, declaration)| {
            declaration
                .into_iter()
                .map(|i| {
                    let mut record = RawDescriptor::named(format!("m{i:02}"));
                    for &dep in edges[i].iter().filter(|&&dep| dep < i) {
                        record = record.depends_on(format!("m{dep:02}"), "implementation");
                    }
                    record
                })
                .collect()
        })
}

fn edges(records: &[RawDescriptor]) -> Vec<(String, String)> {
    records
        .iter()
        .flat_map(|r| {
            let from = r.name.clone().unwrap_or_default();
            r.dependencies
                .iter()
                .filter_map(move |d| d.target.clone().map(|t| (from.clone(), t)))
        })
        .collect()
}

fn plan_records(records: Vec<RawDescriptor>) -> BuildPlan {
    let graph = load_records(records).expect("records load");
    plan(&graph).expect("graph is valid")
}

proptest! {
    #[test]
    fn prop_order_is_permutation_respecting_edges(records in arb_acyclic_records()) {
        let plan = plan_records(records.clone());

        prop_assert_eq!(plan.order.len(), records.len());
        let position: HashMap<&str, usize> = plan
            .order
            .iter()
            .enumerate()
            .map(|(i, m)| (m.as_str(), i))
            .collect();
        prop_assert_eq!(position.len(), records.len());

        for (dependent, dependency) in edges(&records) {
            prop_assert!(position[dependency.as_str()] < position[dependent.as_str()]);
        }
    }

    #[test]
    fn prop_planning_is_deterministic(records in arb_acyclic_records()) {
        let first = plan_records(records.clone());
        let second = plan_records(records.clone());
        prop_assert_eq!(&first, &second);

        let mut reversed = records;
        reversed.reverse();
        let third = plan_records(reversed);
        prop_assert_eq!(first.order, third.order);
    }

    #[test]
    fn prop_cycles_always_reported(
        records in arb_acyclic_records(),
        len in 1usize..5,
    ) {
        // close a chain c0 -> c1 -> ... -> c{len-1} -> c0 on top of the acyclic set
        let mut records = records;
        for i in 0..len {
            let next = (i + 1) % len;
            records.push(
                RawDescriptor::named(format!("c{i}")).depends_on(format!("c{next}"), "api"),
            );
        }

        let graph = load_records(records).expect("records load");
        let err = validate(&graph).expect_err("cycle must be reported");
        let cycles: Vec<&Vec<String>> = err
            .violations()
            .iter()
            .filter_map(|v| match v {
                Violation::CyclicDependency { cycle } => Some(cycle),
                _ => None,
            })
            .collect();

        prop_assert_eq!(cycles.len(), 1);
        prop_assert_eq!(cycles[0].len(), len);
        prop_assert_eq!(cycles[0][0].as_str(), "c0");
    }

    #[test]
    fn prop_duplicates_never_load(records in arb_acyclic_records(), pick in any::<prop::sample::Index>()) {
        let mut records = records;
        let duplicate = records[pick.index(records.len())].clone();
        let name = duplicate.name.clone().unwrap_or_default();
        records.push(duplicate);

        let err = load_records(records).expect_err("duplicate must be rejected");
        prop_assert_eq!(
            err.violations(),
            &[Violation::DuplicateModule { name }][..]
        );
    }
}

#[test]
fn two_modules_with_floors() {
    let plan = plan_records(vec![
        RawDescriptor::named("A").toolchain("17"),
        RawDescriptor::named("B")
            .depends_on("A", "implementation")
            .toolchain("21"),
    ]);

    let order: Vec<&str> = plan.order.iter().map(|m| m.as_str()).collect();
    assert_eq!(order, vec!["A", "B"]);
    assert_eq!(plan.toolchain_floor.map(|v| v.to_string()), Some("21".to_string()));
}

#[test]
fn mutual_dependency_is_a_cycle() {
    let graph = load_records(vec![
        RawDescriptor::named("A").depends_on("B", "implementation"),
        RawDescriptor::named("B").depends_on("A", "implementation"),
    ])
    .unwrap();

    let err = plan(&graph).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(
        err.violations()[0].to_string(),
        "cyclic dependency between modules A,B"
    );
}

#[test]
fn repeated_suite_name() {
    let graph = load_records(vec![RawDescriptor::named("lib")
        .suite("test", "unit")
        .suite("test", "integration")])
    .unwrap();

    let err = validate(&graph).unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::DuplicateTestSuite {
            module: "lib".to_string(),
            suite: "test".to_string(),
        }][..]
    );
}

fn coverage_records(suite: &str) -> Vec<RawDescriptor> {
    let mut coverage = RawDescriptor::named("code-coverage-report").depends_on(":lib", "aggregation");
    coverage.plugins = vec!["base".to_string(), "jacoco-report-aggregation".to_string()];
    coverage.reports.push(RawReport {
        name: Some("testCodeCoverageReport".to_string()),
        kind: Some("jacoco-coverage".to_string()),
        test_suite: Some(suite.to_string()),
    });

    vec![RawDescriptor::named("lib").suite("test", "unit"), coverage]
}

#[test]
fn coverage_report_over_declared_suite() {
    let plan = plan_records(coverage_records("test"));
    assert_eq!(plan.reports.len(), 1);
    assert_eq!(plan.position("lib"), Some(0));
    assert_eq!(plan.position("code-coverage-report"), Some(1));
}

#[test]
fn coverage_report_over_missing_suite() {
    let graph = load_records(coverage_records("integration")).unwrap();
    let err = validate(&graph).unwrap_err();
    assert_eq!(err.violations()[0].kind(), "UnknownReportSuiteError");
}
