//! Shared graph fixtures for unit tests.

use dagql_core::ConversionGraph;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// `a -> b`
pub fn linear() -> ConversionGraph {
    ConversionGraph::from_edges([("a", "b")])
}

/// `s -> {t, h1, h2} -> m`, no cross edges.
pub fn diamond() -> ConversionGraph {
    ConversionGraph::from_edges([
        ("s", "t"),
        ("s", "h1"),
        ("s", "h2"),
        ("t", "m"),
        ("h1", "m"),
        ("h2", "m"),
    ])
}

/// Four competing hops with pairwise overlaps `a-b`, `c-d`, `a-d`.
pub fn overlapping() -> ConversionGraph {
    ConversionGraph::from_edges([
        ("s", "t"),
        ("s", "a"),
        ("s", "b"),
        ("s", "c"),
        ("s", "d"),
        ("t", "m"),
        ("a", "m"),
        ("b", "m"),
        ("c", "m"),
        ("d", "m"),
        ("a", "b"),
        ("c", "d"),
        ("a", "d"),
    ])
}

/// `h1` always continues through `h2`, so `h1` is dominated.
pub fn dominated() -> ConversionGraph {
    ConversionGraph::from_edges([
        ("s", "t"),
        ("s", "h1"),
        ("s", "h2"),
        ("h1", "h2"),
        ("h2", "m"),
        ("t", "m"),
    ])
}

/// Random DAG over `n0..n{size-1}`: each forward pair `i < j` is an edge
/// with probability `p`.
pub fn random_dag(seed: u64, size: usize, p: f64) -> ConversionGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = ConversionGraph::new();
    let ids: Vec<String> = (0..size).map(|i| format!("n{i:02}")).collect();
    for id in &ids {
        graph.ensure_node(id);
    }
    for i in 0..size {
        for j in i + 1..size {
            if rng.gen_bool(p) {
                graph.add_edge(&ids[i], &ids[j]);
            }
        }
    }
    graph
}
