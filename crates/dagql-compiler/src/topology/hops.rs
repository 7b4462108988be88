use dagql_core::{ConversionGraph, NodeIx};
use serde::Serialize;

/// First hops of `split` other than the kept `target` that can still reach `merge`.
///
/// `hops` is sorted by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompetingHopSet {
    pub split: String,
    pub target: String,
    pub merge: String,
    pub hops: Vec<String>,
}

impl CompetingHopSet {
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.hops.iter().any(|h| h == node)
    }
}

/// Successors of `split`, except `target` and `merge`, with a path to `merge`
/// that does not come back through `split`.
pub fn get_competing_first_hops(
    graph: &ConversionGraph,
    split: &str,
    target: &str,
    merge: &str,
) -> CompetingHopSet {
    let hops = match (
        graph.node_ix(split),
        graph.node_ix(target),
        graph.node_ix(merge),
    ) {
        (Some(s), Some(t), Some(m)) => graph
            .ids(&competing_hops_ix(graph, s, t, m))
            .into_iter()
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    };

    CompetingHopSet {
        split: split.to_owned(),
        target: target.to_owned(),
        merge: merge.to_owned(),
        hops,
    }
}

/// Index form of [`get_competing_first_hops`], sorted by node id.
pub(crate) fn competing_hops_ix(
    graph: &ConversionGraph,
    split: NodeIx,
    target: NodeIx,
    merge: NodeIx,
) -> Vec<NodeIx> {
    let mut hops: Vec<NodeIx> = graph
        .successors(split)
        .iter()
        .copied()
        .filter(|&hop| hop != target && hop != merge)
        .filter(|&hop| graph.has_path_avoiding(hop, merge, &[split]))
        .collect();
    hops.sort_by(|&a, &b| graph.node_id(a).cmp(graph.node_id(b)));
    hops
}
