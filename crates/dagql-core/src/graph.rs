//! Index-based conversion graph.
//!
//! Node ids are interned into dense `NodeIx` handles on insertion. Adjacency
//! is stored as successor/predecessor lists in insertion order, so every
//! traversal over the graph is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dense handle to a node in a [`ConversionGraph`].
///
/// Handles are ordered by insertion order, not by id. Use
/// [`ConversionGraph::node_id`] when string ordering matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(u32);

impl NodeIx {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Optional flags carried by a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub absorbing: bool,
}

/// Directed conversion graph.
///
/// Owned by the caller; compiler passes only read it. Acyclicity is a
/// precondition of the compiler's exactness guarantee, not something this
/// type enforces (see [`is_acyclic`](Self::is_acyclic)).
#[derive(Debug, Clone, Default)]
pub struct ConversionGraph {
    nodes: IndexMap<String, NodeMeta>,
    successors: Vec<Vec<NodeIx>>,
    predecessors: Vec<Vec<NodeIx>>,
    edge_count: usize,
}

impl ConversionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` pairs, creating nodes on first mention.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Insert a node, or merge flags into an existing one.
    pub fn add_node(&mut self, id: &str, meta: NodeMeta) -> NodeIx {
        if let Some((index, _, existing)) = self.nodes.get_full_mut(id) {
            existing.is_entry |= meta.is_entry;
            existing.absorbing |= meta.absorbing;
            return NodeIx(index as u32);
        }
        let (index, _) = self.nodes.insert_full(id.to_owned(), meta);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        NodeIx(index as u32)
    }

    /// Returns the handle for `id`, inserting a flagless node if absent.
    pub fn ensure_node(&mut self, id: &str) -> NodeIx {
        match self.node_ix(id) {
            Some(ix) => ix,
            None => self.add_node(id, NodeMeta::default()),
        }
    }

    /// Add a `from -> to` edge. Returns `false` if the edge already existed.
    ///
    /// Parallel edges collapse: flow splitting and path enumeration both
    /// treat the graph as simple.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        self.connect(from, to)
    }

    pub fn connect(&mut self, from: NodeIx, to: NodeIx) -> bool {
        if self.successors[from.index()].contains(&to) {
            return false;
        }
        self.successors[from.index()].push(to);
        self.predecessors[to.index()].push(from);
        self.edge_count += 1;
        true
    }

    pub fn node_ix(&self, id: &str) -> Option<NodeIx> {
        self.nodes.get_index_of(id).map(|i| NodeIx(i as u32))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Resolve a handle back to its id.
    ///
    /// # Panics
    /// Panics if the handle was not created by this graph.
    pub fn node_id(&self, ix: NodeIx) -> &str {
        self.ensure_ix(ix);
        self.nodes
            .get_index(ix.index())
            .map(|(id, _)| id.as_str())
            .unwrap_or_default()
    }

    pub fn meta(&self, ix: NodeIx) -> NodeMeta {
        self.nodes
            .get_index(ix.index())
            .map(|(_, meta)| *meta)
            .unwrap_or_default()
    }

    pub fn successors(&self, ix: NodeIx) -> &[NodeIx] {
        self.successors
            .get(ix.index())
            .map_or(&[], Vec::as_slice)
    }

    pub fn predecessors(&self, ix: NodeIx) -> &[NodeIx] {
        self.predecessors
            .get(ix.index())
            .map_or(&[], Vec::as_slice)
    }

    pub fn out_degree(&self, ix: NodeIx) -> usize {
        self.successors(ix).len()
    }

    pub fn has_edge(&self, from: NodeIx, to: NodeIx) -> bool {
        self.successors(from).contains(&to)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &str)> + '_ {
        self.nodes
            .keys()
            .enumerate()
            .map(|(i, id)| (NodeIx(i as u32), id.as_str()))
    }

    /// Iterate edges grouped by source, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIx, NodeIx)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(i, succs)| succs.iter().map(move |&to| (NodeIx(i as u32), to)))
    }

    /// Ids for a slice of handles.
    pub fn ids<'g>(&'g self, path: &[NodeIx]) -> Vec<&'g str> {
        path.iter().map(|&ix| self.node_id(ix)).collect()
    }
}
