use dagql_core::{ConversionGraph, ProviderCapability};

use super::{
    FlowReport, ValidationError, validate_compiled_with_flow,
    validate_inclusion_exclusion_with_flow, validate_native_exclude_with_flow,
    validate_terms_with_flow,
};
use crate::compile::{Term, compile_query_for_edge};
use crate::test_utils;

fn hops(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn diamond_flow_splits_evenly() {
    let graph = test_utils::diamond();
    let report =
        validate_inclusion_exclusion_with_flow(&graph, "s", "t", "m", &hops(&["h1", "h2"]), 1.0)
            .unwrap();

    assert_eq!(report.path_count, 3);
    assert_close(report.total_flow, 1.0);
    assert_close(report.direct_flow, 1.0 / 3.0);
    assert_close(report.non_direct_flow, 2.0 / 3.0);
    assert_close(report.compiled_flow, 1.0 / 3.0);
    assert_eq!(report.term_flows.len(), 3);
    assert_close(report.term_flows[0], 1.0);
    assert_close(report.term_flows[1], 1.0 / 3.0);
    assert_close(report.term_flows[2], 1.0 / 3.0);
}

#[test]
fn overlapping_plan_is_exact() {
    let graph = test_utils::overlapping();
    let report = validate_inclusion_exclusion_with_flow(
        &graph,
        "s",
        "t",
        "m",
        &hops(&["a", "b", "c", "d"]),
        1.0,
    )
    .unwrap();

    assert_eq!(report.path_count, 8);
    assert_close(report.total_flow, 1.0);
    assert_close(report.direct_flow, 0.2);
    assert_close(report.non_direct_flow, 0.8);
    assert_close(report.excluded_flow, 0.8);
}

#[test]
fn dominated_hop_needs_no_term() {
    let graph = test_utils::dominated();
    let report =
        validate_inclusion_exclusion_with_flow(&graph, "s", "t", "m", &hops(&["h1", "h2"]), 3.0)
            .unwrap();

    // base plus minus(h2)
    assert_eq!(report.term_flows.len(), 2);
    assert_close(report.term_flows[1], 2.0);
    assert_close(report.direct_flow, 1.0);
}

#[test]
fn missing_plus_terms_are_detected() {
    let graph = test_utils::overlapping();
    let singles: Vec<Term> = std::iter::once(Term::base("s", "m"))
        .chain(["a", "b", "c", "d"].map(|h| Term::subset("s", "m", hops(&[h]))))
        .collect();

    let err = validate_terms_with_flow(
        &graph,
        "s",
        "m",
        &hops(&["a", "b", "c", "d"]),
        &singles,
        1.0,
    )
    .unwrap_err();

    let ValidationError::Mismatch {
        quantity,
        expected,
        actual,
        ..
    } = err
    else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(quantity, "non-direct flow");
    assert_close(expected, 0.8);
    assert!(actual > expected);
}

#[test]
fn native_exclude_keeps_only_direct_paths() {
    let graph = test_utils::overlapping();
    let report =
        validate_native_exclude_with_flow(&graph, "s", "t", "m", &hops(&["a", "b", "c", "d"]), 10.0)
            .unwrap();

    assert_close(report.compiled_flow, 2.0);
    assert_close(report.excluded_flow, 8.0);
    assert_eq!(report.term_flows.len(), 1);
}

#[test]
fn compiled_query_round_trips_through_oracle() {
    let graph = test_utils::overlapping();
    for capability in [
        ProviderCapability::funnel_only(),
        ProviderCapability::native_exclude(),
    ] {
        let plan = compile_query_for_edge(&graph, ("s", "t"), &capability).unwrap();
        let report =
            validate_compiled_with_flow(&graph, plan.query(), plan.competing_hops(), 100.0)
                .unwrap();
        assert_close(report.compiled_flow, 20.0);
    }
}

#[test]
fn compiled_query_term_flows_follow_clause_order() {
    let graph = test_utils::diamond();
    let report =
        validate_compiled_with_flow(&graph, "from(s).to(m).minus(h1).minus(h2)", &hops(&["h1", "h2"]), 3.0)
            .unwrap();

    assert_eq!(report.term_flows.len(), 3);
    assert_close(report.term_flows[0], 3.0);
    assert_close(report.term_flows[1], 1.0);
    assert_close(report.term_flows[2], 1.0);
}

#[test]
fn wrong_compiled_query_is_a_mismatch() {
    let graph = test_utils::diamond();
    let err = validate_compiled_with_flow(&graph, "from(s).to(m).minus(h1)", &hops(&["h1", "h2"]), 1.0)
        .unwrap_err();

    assert!(matches!(
        err,
        ValidationError::Mismatch {
            quantity: "direct flow",
            ..
        }
    ));
}

#[test]
fn compiled_query_needs_endpoints() {
    let graph = test_utils::diamond();
    let err = validate_compiled_with_flow(&graph, "to(m).minus(h1)", &[], 1.0).unwrap_err();
    assert_eq!(err, ValidationError::MissingEndpoint("from"));

    let err = validate_compiled_with_flow(&graph, "from(s", &[], 1.0).unwrap_err();
    assert!(matches!(err, ValidationError::Query(_)));
}

#[test]
fn unknown_nodes_carry_no_flow() {
    let graph = ConversionGraph::from_edges([("a", "b")]);
    let report = validate_inclusion_exclusion_with_flow(&graph, "x", "y", "z", &[], 1.0).unwrap();
    assert_eq!(report.path_count, 0);
    assert_eq!(
        report,
        FlowReport {
            term_flows: vec![0.0],
            ..FlowReport::default()
        }
    );
}

#[test]
fn mismatch_message() {
    let err = ValidationError::Mismatch {
        quantity: "direct flow",
        expected: 0.5,
        actual: 0.25,
        tolerance: 1e-6,
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"direct flow mismatch: expected 0.5, got 0.25 (tolerance 0.000001)"
    );
}
