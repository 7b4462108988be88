//! Flow oracle for compiled plans.
//!
//! Synthetic flow starts at `S` and splits equally over each node's out-edges;
//! a simple path carries `n_start * prod(1 / out_degree)` over its non-final
//! nodes. A path is *direct* when its interior avoids every competing hop,
//! otherwise *non-direct*. A plan is exact when its signed term flows
//! reproduce the non-direct flow (and so leave exactly the direct flow).
//!
//! This is a test oracle, not part of compilation: path enumeration is
//! exponential in the worst case.

mod flow;
mod oracle;

#[cfg(test)]
mod oracle_tests;
#[cfg(test)]
mod random_tests;

use serde::Serialize;

use crate::compile::CompileError;

pub use flow::PathFlows;
pub use oracle::{
    validate_compiled_with_flow, validate_inclusion_exclusion_with_flow,
    validate_native_exclude_with_flow, validate_terms_with_flow,
};

/// Absolute tolerance for flow comparisons.
pub const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{quantity} mismatch: expected {expected}, got {actual} (tolerance {tolerance})")]
    Mismatch {
        quantity: &'static str,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    #[error("query has no `{0}` clause")]
    MissingEndpoint(&'static str),

    #[error(transparent)]
    Query(#[from] crate::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Flow totals for one validated plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowReport {
    pub path_count: usize,
    /// Flow over every simple path `S -> M`.
    pub total_flow: f64,
    pub direct_flow: f64,
    pub non_direct_flow: f64,
    /// What the plan removes from the base funnel.
    pub excluded_flow: f64,
    /// What the plan keeps; equals `direct_flow` for an exact plan.
    pub compiled_flow: f64,
    /// Unsigned flow per term, parallel to the plan's terms.
    pub term_flows: Vec<f64>,
}

fn check(quantity: &'static str, expected: f64, actual: f64) -> Result<(), ValidationError> {
    if (expected - actual).abs() <= TOLERANCE {
        Ok(())
    } else {
        Err(ValidationError::Mismatch {
            quantity,
            expected,
            actual,
            tolerance: TOLERANCE,
        })
    }
}
