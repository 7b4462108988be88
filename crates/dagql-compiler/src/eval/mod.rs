//! Constraint evaluation against a concrete journey.
//!
//! A journey is described by the set of nodes it visited plus two string maps
//! (context and case variants). Conditions never error at evaluation time:
//! a missing key simply does not match.

mod evaluate;
mod specificity;


pub use evaluate::{EvalContext, evaluate_constraint_condition};
pub use specificity::{constraint_specificity_score, select_conditional_branch, specificity};
