//! Path enumeration and reachability.
//!
//! Simple-path enumeration is an explicit DFS over the adjacency lists with
//! an on-path bitmap, yielding lazily so existence checks can stop at the
//! first path. No recursion is involved, so graph depth is not limited by the
//! call stack.

use std::collections::VecDeque;

use crate::{ConversionGraph, NodeIx};

/// Lazy iterator over simple paths between two nodes.
///
/// Each item is the full node sequence, source and target included. Paths
/// come out in DFS order following successor insertion order.
#[derive(Debug, Clone)]
pub struct SimplePaths<'g> {
    graph: &'g ConversionGraph,
    target: NodeIx,
    /// DFS frames: node plus the index of the next successor to try.
    stack: Vec<(NodeIx, usize)>,
    on_path: Vec<bool>,
}

impl<'g> SimplePaths<'g> {
    fn new(graph: &'g ConversionGraph, source: NodeIx, target: NodeIx, avoid: &[NodeIx]) -> Self {
        let mut on_path = vec![false; graph.node_count()];
        for &ix in avoid {
            if let Some(slot) = on_path.get_mut(ix.index()) {
                *slot = true;
            }
        }

        let blocked = source == target || on_path.get(source.index()).copied().unwrap_or(true);
        let mut stack = Vec::new();
        if !blocked {
            on_path[source.index()] = true;
            stack.push((source, 0));
        }

        Self {
            graph,
            target,
            stack,
            on_path,
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<NodeIx>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(node, next) = self.stack.last()?;

            let Some(&succ) = self.graph.successors(node).get(next) else {
                self.on_path[node.index()] = false;
                self.stack.pop();
                continue;
            };

            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }

            if succ == self.target {
                let mut path: Vec<NodeIx> = self.stack.iter().map(|&(n, _)| n).collect();
                path.push(succ);
                return Some(path);
            }

            if !self.on_path[succ.index()] {
                self.on_path[succ.index()] = true;
                self.stack.push((succ, 0));
            }
        }
    }
}

impl ConversionGraph {
    /// All simple paths `source -> target`, lazily.
    ///
    /// A node is never a path to itself, so `source == target` yields nothing.
    pub fn simple_paths(&self, source: NodeIx, target: NodeIx) -> SimplePaths<'_> {
        SimplePaths::new(self, source, target, &[])
    }

    /// Simple paths that never touch any node in `avoid`.
    pub fn simple_paths_avoiding(
        &self,
        source: NodeIx,
        target: NodeIx,
        avoid: &[NodeIx],
    ) -> SimplePaths<'_> {
        SimplePaths::new(self, source, target, avoid)
    }

    /// Nodes reachable from `source` (itself included), as a membership bitmap.
    pub fn reachable_from(&self, source: NodeIx) -> Vec<bool> {
        self.reachable_avoiding(source, &[])
    }

    fn reachable_avoiding(&self, source: NodeIx, avoid: &[NodeIx]) -> Vec<bool> {
        let mut seen = vec![false; self.node_count()];
        if source.index() >= seen.len() || avoid.contains(&source) {
            return seen;
        }
        for &ix in avoid {
            if let Some(slot) = seen.get_mut(ix.index()) {
                *slot = true;
            }
        }

        let mut queue = VecDeque::from([source]);
        seen[source.index()] = true;
        let mut reached = vec![false; self.node_count()];
        reached[source.index()] = true;

        while let Some(node) = queue.pop_front() {
            for &succ in self.successors(node) {
                if !seen[succ.index()] {
                    seen[succ.index()] = true;
                    reached[succ.index()] = true;
                    queue.push_back(succ);
                }
            }
        }
        reached
    }

    /// Whether `to` is reachable from `from` without passing through `avoid`.
    pub fn has_path_avoiding(&self, from: NodeIx, to: NodeIx, avoid: &[NodeIx]) -> bool {
        self.reachable_avoiding(from, avoid)
            .get(to.index())
            .copied()
            .unwrap_or(false)
    }

    /// Kahn topological order, ties broken by insertion order.
    ///
    /// Returns `None` when the graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<NodeIx>> {
        let mut in_degree: Vec<usize> = (0..self.node_count())
            .map(|i| self.predecessors(NodeIx::from_raw(i as u32)).len())
            .collect();

        let mut ready: std::collections::BTreeSet<NodeIx> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| NodeIx::from_raw(i as u32))
            .collect();

        let mut order = Vec::with_capacity(self.node_count());
        while let Some(node) = ready.pop_first() {
            order.push(node);
            for &succ in self.successors(node) {
                let d = &mut in_degree[succ.index()];
                *d -= 1;
                if *d == 0 {
                    ready.insert(succ);
                }
            }
        }

        (order.len() == self.node_count()).then_some(order)
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_some()
    }
}
