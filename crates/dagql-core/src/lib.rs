#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for dagql conversion graphs.
//!
//! Two layers:
//! - **Document layer**: 1:1 mapping to the persisted graph JSON (`GraphDocument`)
//! - **Analysis layer**: index-based adjacency (`ConversionGraph`) for path queries
//!
//! Provider capability facts live here too, since both the compiler and the
//! CLI consume them as plain lookups.

mod document;
mod graph;
mod invariants;
mod paths;
mod provider;

#[cfg(test)]
mod document_tests;
#[cfg(test)]
mod provider_tests;

pub use document::{EdgeDocument, GraphDocument, GraphError, NodeDocument};
pub use graph::{ConversionGraph, NodeIx, NodeMeta};
pub use paths::SimplePaths;
pub use provider::{ProviderCapability, ProviderRegistry, RegistryError};
