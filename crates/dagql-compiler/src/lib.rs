//! dagql: a path-constraint language over conversion graphs, and a compiler
//! that turns "reach M from S without going through X" into queries a
//! funnel-only analytics provider can run.
//!
//! # Example
//!
//! ```
//! use dagql_compiler::{compile::compile_query_for_edge, query::parse_query};
//! use dagql_core::{ConversionGraph, ProviderCapability};
//!
//! let graph = ConversionGraph::from_edges([("s", "t"), ("s", "h"), ("h", "t")]);
//! let plan = compile_query_for_edge(&graph, ("s", "t"), &ProviderCapability::funnel_only())
//!     .expect("two branches fit in a subset mask");
//! assert_eq!(plan.query(), "from(s).to(t).minus(h)");
//!
//! let query = parse_query(plan.query()).expect("compiled queries re-parse");
//! assert_eq!(query.minus, vec![vec!["h".to_string()]]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod eval;
pub mod parser;
pub mod query;
pub mod topology;
pub mod validate;

#[cfg(test)]
mod test_utils;

/// Result type for passes that produce both output and non-fatal diagnostics.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use query::{ParseError, ParsedCondition, ParsedQuery, UnsupportedClauseError};

/// Errors from turning text into queries or conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    UnsupportedClause(#[from] UnsupportedClauseError),
}

impl Error {
    /// Diagnostics behind a parse failure, for rendering against the source.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Parse(err) => Some(err.diagnostics()),
            Error::UnsupportedClause(_) => None,
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;
