//! Edge compilation.
//!
//! For an edge `S -> T` the question is "reach the merge node `M` from `S`
//! through `T`, not through any competing first hop". Providers with native
//! exclusion get one `exclude(...)` query. Everyone else gets an
//! inclusion-exclusion plan over `visited(...)` funnels:
//!
//! ```text
//! from(s).to(m).minus(a).minus(b).plus(a,b)
//! ```
//!
//! `minus(..)`/`plus(..)` name the visited set of a term relative to the
//! query's own `from`/`to`, so the combined string stays flat and re-parses.

mod combinations;
mod edge;
mod inclusion_exclusion;
mod plan;

#[cfg(test)]
mod combinations_tests;

pub use edge::{compile_all_edges, compile_query_for_edge};
pub use inclusion_exclusion::{Dominance, InclusionExclusion, inclusion_exclusion_terms};
pub use plan::{CompiledQuery, Strategy, Term};

/// Competing hops are tracked as bits of a `u64` path mask.
pub const MAX_BRANCHES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("{count} competing branches exceed the inclusion-exclusion limit of {limit}")]
    TooManyBranches { count: usize, limit: usize },
}
