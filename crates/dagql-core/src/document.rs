//! JSON deserialization for persisted conversion-graph documents.
//!
//! The document is the caller-side interchange format: a flat node list with
//! optional flags, plus `{from, to}` edges referencing node ids.

use serde::{Deserialize, Serialize};

use crate::{ConversionGraph, NodeMeta};

/// Error while turning a document into a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("graph document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("edge `{from}` -> `{to}` references undeclared node `{missing}`")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_entry: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub absorbing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDocument {
    pub from: String,
    pub to: String,
}

/// Raw graph document, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
    #[serde(default)]
    pub edges: Vec<EdgeDocument>,
}

impl GraphDocument {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<GraphDocument> for ConversionGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        let mut graph = ConversionGraph::new();

        for node in &doc.nodes {
            if graph.contains(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            graph.add_node(
                &node.id,
                NodeMeta {
                    is_entry: node.is_entry,
                    absorbing: node.absorbing,
                },
            );
        }

        for edge in &doc.edges {
            let (Some(from), Some(to)) = (graph.node_ix(&edge.from), graph.node_ix(&edge.to))
            else {
                let missing = if graph.contains(&edge.from) {
                    &edge.to
                } else {
                    &edge.from
                };
                return Err(GraphError::UnknownEndpoint {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: missing.clone(),
                });
            };
            graph.connect(from, to);
        }

        Ok(graph)
    }
}

impl ConversionGraph {
    /// Parse a persisted graph document.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        GraphDocument::from_json(json)?.try_into()
    }

    /// Snapshot back into the document form (node and edge order preserved).
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self
                .nodes()
                .map(|(ix, id)| {
                    let meta = self.meta(ix);
                    NodeDocument {
                        id: id.to_owned(),
                        is_entry: meta.is_entry,
                        absorbing: meta.absorbing,
                    }
                })
                .collect(),
            edges: self
                .edges()
                .map(|(from, to)| EdgeDocument {
                    from: self.node_id(from).to_owned(),
                    to: self.node_id(to).to_owned(),
                })
                .collect(),
        }
    }
}
