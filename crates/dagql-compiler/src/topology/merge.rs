use dagql_core::{ConversionGraph, NodeIx};
use tracing::debug;

/// Earliest node downstream of `split` where the kept branch through
/// `target` and every other first hop that can reach it have reconverged.
///
/// Returns `target` itself when `split` has a single successor, when either
/// node is unknown, when no other hop rejoins the target's descendants, and
/// when the graph is cyclic (no topological order to pick "earliest" from).
///
/// Common descendants with no path between them are equally early; the one
/// added to the graph first wins, following the insertion-order tie-break of
/// [`ConversionGraph::topological_order`].
pub fn find_minimal_merge(graph: &ConversionGraph, split: &str, target: &str) -> String {
    match (graph.node_ix(split), graph.node_ix(target)) {
        (Some(s), Some(t)) => graph.node_id(minimal_merge_ix(graph, s, t)).to_owned(),
        _ => target.to_owned(),
    }
}

pub(crate) fn minimal_merge_ix(graph: &ConversionGraph, split: NodeIx, target: NodeIx) -> NodeIx {
    if graph.out_degree(split) <= 1 {
        return target;
    }

    // Candidates: descendants of T (T included) that every rejoining hop also reaches.
    let mut candidates = graph.reachable_from(target);
    let mut rejoining = 0usize;
    for &hop in graph.successors(split) {
        if hop == target {
            continue;
        }
        let reach = graph.reachable_from(hop);
        let meets_target = reach.iter().zip(&candidates).any(|(&r, &c)| r && c);
        if !meets_target {
            continue;
        }
        rejoining += 1;
        for (candidate, &reached) in candidates.iter_mut().zip(&reach) {
            *candidate &= reached;
        }
    }

    if rejoining == 0 {
        return target;
    }

    let Some(order) = graph.topological_order() else {
        debug!(
            split = graph.node_id(split),
            "graph is cyclic, merge falls back to the target"
        );
        return target;
    };

    let merge = order
        .into_iter()
        .find(|ix| candidates.get(ix.index()).copied().unwrap_or(false))
        .unwrap_or(target);

    debug!(
        split = graph.node_id(split),
        target = graph.node_id(target),
        merge = graph.node_id(merge),
        rejoining,
        "minimal merge"
    );
    merge
}
