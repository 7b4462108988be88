use dagql_core::{ConversionGraph, ProviderCapability};
use proptest::prelude::*;

use super::{
    validate_compiled_with_flow, validate_inclusion_exclusion_with_flow,
    validate_native_exclude_with_flow,
};
use crate::compile::{CompiledQuery, compile_all_edges};
use crate::test_utils;

const SEEDS: u64 = 12;
const SIZE: usize = 20;
const EDGE_PROBABILITY: f64 = 0.15;

fn check_plan(graph: &ConversionGraph, plan: &CompiledQuery, label: &str) {
    let context = format!("{label} {}->{}: {}", plan.split(), plan.target(), plan.query());

    validate_compiled_with_flow(graph, plan.query(), plan.competing_hops(), 1.0)
        .unwrap_or_else(|err| panic!("{context}: {err}"));
    validate_inclusion_exclusion_with_flow(
        graph,
        plan.split(),
        plan.target(),
        plan.merge(),
        plan.competing_hops(),
        1.0,
    )
    .unwrap_or_else(|err| panic!("{context}: {err}"));
    validate_native_exclude_with_flow(
        graph,
        plan.split(),
        plan.target(),
        plan.merge(),
        plan.competing_hops(),
        1.0,
    )
    .unwrap_or_else(|err| panic!("{context}: {err}"));
}

#[test]
fn seeded_random_dags_compile_exactly() {
    for seed in 0..SEEDS {
        let graph = test_utils::random_dag(seed, SIZE, EDGE_PROBABILITY);
        for capability in [
            ProviderCapability::funnel_only(),
            ProviderCapability::native_exclude(),
        ] {
            let plans = compile_all_edges(&graph, &capability).unwrap();
            assert_eq!(plans.len(), graph.edge_count());
            for plan in &plans {
                check_plan(&graph, plan, &format!("seed {seed}"));
            }
        }
    }
}

#[test]
fn seeded_term_counts_stay_bounded() {
    for seed in 0..SEEDS {
        let graph = test_utils::random_dag(seed, SIZE, EDGE_PROBABILITY);
        for plan in compile_all_edges(&graph, &ProviderCapability::funnel_only()).unwrap() {
            let active = plan.active_hops();
            let subsets = plan.terms().len() - 1;

            assert!(subsets >= active.len(), "{}", plan.query());
            assert!(subsets < 1 << active.len(), "{}", plan.query());
            for term in plan.terms() {
                assert!(
                    term.visited.iter().all(|h| active.contains(h)),
                    "{} mentions an eliminated hop",
                    term.query
                );
            }
        }
    }
}

/// Splits whose fan-out exceeds this are skipped by the exhaustive sweep.
const MAX_SWEEP_FANOUT: usize = 6;

#[test]
fn seeded_sweep_over_any_merge_and_hop_subset() {
    let mut checked = 0usize;
    for seed in 0..SEEDS {
        let graph = test_utils::random_dag(seed, SIZE, EDGE_PROBABILITY);
        for (s, split) in graph.nodes() {
            let successors = graph.successors(s);
            let Some(&first) = successors.first() else {
                continue;
            };
            if successors.len() > MAX_SWEEP_FANOUT {
                continue;
            }
            let target = graph.node_id(first);
            let reachable = graph.reachable_from(s);

            for (m, merge) in graph.nodes() {
                if m == s || !reachable[m.index()] {
                    continue;
                }
                for mask in 0u32..1 << successors.len() {
                    let hops: Vec<String> = successors
                        .iter()
                        .enumerate()
                        .filter(|&(bit, _)| mask & (1 << bit) != 0)
                        .map(|(_, &hop)| graph.node_id(hop).to_owned())
                        .collect();

                    let report =
                        validate_inclusion_exclusion_with_flow(&graph, split, target, merge, &hops, 1.0)
                            .unwrap_or_else(|err| {
                                panic!("seed {seed} {split}->{merge} hops {hops:?}: {err}")
                            });
                    assert!(report.path_count > 0, "{split}->{merge} is reachable");
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 500, "sweep only covered {checked} combinations");
}

/// Forward edges over `n00..n11`, so every generated graph is acyclic.
fn dag() -> impl Strategy<Value = ConversionGraph> {
    prop::collection::vec((0usize..12, 0usize..12), 0..30).prop_map(|pairs| {
        let mut graph = ConversionGraph::new();
        for (a, b) in pairs {
            if a != b {
                let (lo, hi) = (a.min(b), a.max(b));
                graph.add_edge(&format!("n{lo:02}"), &format!("n{hi:02}"));
            }
        }
        graph
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compiled_plans_match_flow(graph in dag()) {
        for plan in compile_all_edges(&graph, &ProviderCapability::funnel_only()).unwrap() {
            let report = validate_compiled_with_flow(&graph, plan.query(), plan.competing_hops(), 1.0);
            prop_assert!(report.is_ok(), "{}: {:?}", plan.query(), report);
        }
    }

    #[test]
    fn merge_is_reachable_from_split(graph in dag()) {
        prop_assert!(graph.is_acyclic());
        for plan in compile_all_edges(&graph, &ProviderCapability::native_exclude()).unwrap() {
            let split = graph.node_ix(plan.split()).unwrap();
            let merge = graph.node_ix(plan.merge()).unwrap();
            prop_assert!(graph.reachable_from(split)[merge.index()]);
        }
    }
}
