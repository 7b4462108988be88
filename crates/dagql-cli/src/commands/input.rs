//! Loading queries, graphs and provider capabilities from disk.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use dagql_core::{ConversionGraph, GraphError, ProviderCapability, ProviderRegistry, RegistryError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeSelection {
    One { from: String, to: String },
    All,
}

/// Where the provider capability comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSource {
    FunnelOnly,
    NativeExclude,
    Named { name: String, registry: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("query is required: use a positional argument or -q/--query")]
    MissingQuery,

    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Graph {
        path: String,
        #[source]
        source: GraphError,
    },

    #[error("{path}: {source}")]
    Registry {
        path: String,
        #[source]
        source: RegistryError,
    },

    #[error(transparent)]
    Provider(RegistryError),
}

pub fn load_query(query_path: Option<&Path>, query_text: Option<&str>) -> Result<String, InputError> {
    let source = match (query_text, query_path) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) if path.as_os_str() == "-" => read_stdin()?,
        (None, Some(path)) => read_file(path)?,
        (None, None) => return Err(InputError::MissingQuery),
    };

    if source.trim().is_empty() {
        return Err(InputError::EmptyQuery);
    }
    Ok(source)
}

pub fn load_graph(path: &Path) -> Result<ConversionGraph, InputError> {
    let json = read_file(path)?;
    let graph = ConversionGraph::from_json(&json).map_err(|source| InputError::Graph {
        path: path.display().to_string(),
        source,
    })?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    if !graph.is_acyclic() {
        warn!(path = %path.display(), "graph has a cycle; compiled plans may not be exact");
    }
    Ok(graph)
}

pub fn resolve_capability(source: &ProviderSource) -> Result<ProviderCapability, InputError> {
    match source {
        ProviderSource::FunnelOnly => Ok(ProviderCapability::funnel_only()),
        ProviderSource::NativeExclude => Ok(ProviderCapability::native_exclude()),
        ProviderSource::Named { name, registry } => {
            let json = read_file(registry)?;
            let providers =
                ProviderRegistry::from_json(&json).map_err(|source| InputError::Registry {
                    path: registry.display().to_string(),
                    source,
                })?;
            let capability = *providers.require(name).map_err(InputError::Provider)?;
            debug!(provider = %name, ?capability, "provider resolved");
            Ok(capability)
        }
    }
}

/// Edges to process, by node id.
pub fn select_edges(graph: &ConversionGraph, selection: &EdgeSelection) -> Vec<(String, String)> {
    match selection {
        EdgeSelection::All => graph
            .edges()
            .map(|(from, to)| {
                (
                    graph.node_id(from).to_owned(),
                    graph.node_id(to).to_owned(),
                )
            })
            .collect(),
        EdgeSelection::One { from, to } => {
            for node in [from, to] {
                if !graph.contains(node) {
                    warn!(node = %node, "node not in graph; plan will be trivial");
                }
            }
            vec![(from.clone(), to.clone())]
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn read_stdin() -> Result<String, InputError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|source| InputError::Read {
            path: "<stdin>".to_owned(),
            source,
        })?;
    Ok(buf)
}
